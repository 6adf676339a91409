//! Player persistence: a checksummed binary save file.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Serialized player record (variable length)
//! - SHA256 checksum over the three preceding sections (32 bytes)

use crate::cards::{catalog, Card};
use crate::constants::SAVE_VERSION_MAGIC;
use crate::loadout::AscensionTier;
use crate::progression::Progress;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Everything about a player that survives between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// The full equipped loadout, in order.
    pub deck: Vec<Card>,
    pub ascension: Vec<AscensionTier>,
    pub progress: Progress,
    pub gold: u64,
    pub highest_floor: u32,
    pub total_kills: u64,
    /// In-game day, advanced once per completed run.
    pub day: u32,
    pub saved_at: DateTime<Utc>,
}

impl PlayerRecord {
    /// A fresh player with the starter deck.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            deck: catalog::starter_deck(),
            ascension: Vec::new(),
            progress: Progress::default(),
            gold: 0,
            highest_floor: 0,
            total_kills: 0,
            day: 1,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Bad magic, bad checksum or undecodable payload.
    #[error("save file is corrupt: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Manages the on-disk save file.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform config directory for this application.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "ascent").ok_or_else(|| {
            SaveError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine config directory",
            ))
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Uses an explicit path instead of the platform directory.
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Writes the record, stamping `saved_at` with the current time.
    pub fn save(&self, record: &PlayerRecord) -> Result<(), SaveError> {
        let mut record = record.clone();
        record.saved_at = Utc::now();

        let data =
            bincode::serialize(&record).map_err(|e| SaveError::Corrupt(e.to_string()))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the record. A missing file is `Ok(None)`; a present but
    /// unreadable file is an error.
    pub fn load(&self) -> Result<Option<PlayerRecord>, SaveError> {
        let mut file = match fs::File::open(&self.save_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(SaveError::Corrupt(format!(
                "version mismatch: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(SaveError::Corrupt("checksum mismatch".to_string()));
        }

        let record =
            bincode::deserialize(&data).map_err(|e| SaveError::Corrupt(e.to_string()))?;
        Ok(Some(record))
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Removes the save file if present.
    pub fn delete(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.save_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;

    fn temp_manager(tag: &str) -> SaveManager {
        let path = std::env::temp_dir().join(format!("ascent-save-test-{tag}.dat"));
        let manager = SaveManager::with_path(path);
        manager.delete().unwrap();
        manager
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let manager = temp_manager("round-trip");

        let mut record = PlayerRecord::new("Climber");
        record.gold = 420;
        record.highest_floor = 37;
        record.total_kills = 99;
        record.ascension = vec![AscensionTier::Vigor, AscensionTier::Fortune];
        record.progress.gain_xp(5200);

        manager.save(&record).expect("save failed");
        assert!(manager.save_exists());

        let loaded = manager.load().expect("load failed").expect("no record");
        assert_eq!(loaded.name, record.name);
        assert_eq!(loaded.deck, record.deck);
        assert_eq!(loaded.ascension, record.ascension);
        assert_eq!(loaded.progress, record.progress);
        assert_eq!(loaded.gold, 420);
        assert_eq!(loaded.highest_floor, 37);
        assert_eq!(loaded.total_kills, 99);

        manager.delete().unwrap();
    }

    #[test]
    fn test_load_absent_file_is_none() {
        let manager = temp_manager("absent");
        let loaded = manager.load().expect("absent file must not error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupted_payload_is_rejected() {
        let manager = temp_manager("corrupt");
        manager.save(&PlayerRecord::new("Climber")).unwrap();

        // Flip one byte in the middle of the payload.
        let mut bytes = fs::read(&manager.save_path).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        let mut file = OpenOptions::new()
            .write(true)
            .open(&manager.save_path)
            .unwrap();
        file.write_all(&bytes).unwrap();

        match manager.load() {
            Err(SaveError::Corrupt(_)) => {}
            other => panic!("expected corrupt error, got {other:?}"),
        }

        manager.delete().unwrap();
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let manager = temp_manager("magic");
        manager.save(&PlayerRecord::new("Climber")).unwrap();

        let mut bytes = fs::read(&manager.save_path).unwrap();
        bytes[0] ^= 0xFF;
        fs::write(&manager.save_path, &bytes).unwrap();

        assert!(matches!(manager.load(), Err(SaveError::Corrupt(_))));
        manager.delete().unwrap();
    }
}
