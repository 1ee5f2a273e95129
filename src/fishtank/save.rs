//! Fishtank Tycoon セーブ/ロード機能。
//!
//! スナップショット全体を 1 件の JSON レコードとしてキー/値ストアに書き込む。
//! ブラウザでは localStorage、テストやネイティブビルドでは [`MemoryStore`] を使う。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! 不足フィールドは `#[serde(default)]` で補完し、未知のフィールドは無視する。

use std::collections::HashMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::Catalog;
use super::logic::round2;
use super::state::Snapshot;

/// セーブデータのフォーマットバージョン。
const SAVE_VERSION: u32 = 1;

/// 互換性を維持できる最小バージョン。
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage のキー。
pub const STORAGE_KEY: &str = "fishtank_tycoon_save";

#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(target_arch = "wasm32")]
    #[error("storage is unavailable")]
    Unavailable,

    #[cfg(target_arch = "wasm32")]
    #[error("failed to read storage: {0}")]
    Read(String),

    #[error("failed to write storage: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 文字列 blob を 1 キー単位で読み書きするストア。
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// メモリ上のストア。テストとネイティブビルド用。
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// ブラウザの localStorage。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl BlobStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Read(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}

/// シリアライズ用のセーブデータ構造体。
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    #[serde(default)]
    game: Snapshot,
}

fn to_save(snapshot: &Snapshot) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: snapshot.clone(),
    }
}

/// ストアからスナップショットを復元する。
/// 未保存・パースエラー・互換性のないバージョンの場合は None を返す（新規ゲームになる）。
/// パースできなかったレコードは削除する。
pub fn load<S: BlobStore + ?Sized>(store: &mut S, catalog: &Catalog) -> Option<Snapshot> {
    let json = match store.get(STORAGE_KEY) {
        Ok(Some(j)) => j,
        Ok(None) => return None,
        Err(e) => {
            warn!("Fishtank: セーブデータを読めません: {e}");
            return None;
        }
    };

    let save_data: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            warn!("Fishtank: セーブデータのパースに失敗（破棄します）: {e}");
            // 壊れたデータを削除
            discard(store);
            return None;
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        info!(
            "Fishtank: セーブバージョンが古すぎます (saved={}, min_compatible={})。新規ゲームを開始します。",
            save_data.version, MIN_COMPATIBLE_VERSION
        );
        discard(store);
        return None;
    }

    let mut snapshot = save_data.game;
    let added = snapshot.fill_missing(catalog);
    if added > 0 {
        debug!("Fishtank: 新しい魚 {added} 匹をセーブデータに追加");
    }
    snapshot.coins = round2(snapshot.coins.max(0.0));
    Some(snapshot)
}

/// 読めなかったレコードを削除する。失敗は警告ログのみ。
fn discard<S: BlobStore + ?Sized>(store: &mut S) {
    if let Err(e) = store.remove(STORAGE_KEY) {
        warn!("Fishtank: 壊れたセーブデータを削除できません: {e}");
    }
}

/// スナップショット全体を保存する（既存レコードは上書き）。
pub fn save<S: BlobStore + ?Sized>(store: &mut S, snapshot: &Snapshot) -> Result<(), StoreError> {
    let json = serde_json::to_string(&to_save(snapshot))?;
    store.set(STORAGE_KEY, &json)
}

/// セーブデータを削除する。
pub fn reset<S: BlobStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(STORAGE_KEY)
}

/// 開発用エクスポート。保存されるものと同じレコードを整形 JSON で返す。
pub fn export(snapshot: &Snapshot) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&to_save(snapshot))?)
}
