use crate::constants::SAVE_VERSION_MAGIC;
use crate::core::state::ExplorationState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Saves and loads exploration state with a checksummed binary format.
///
/// Nothing in the state may be recomputed non-deterministically on reload,
/// so the full aggregate — world graph (with generated flags), connections,
/// knowledge sets, and the roll stream counter — goes through serialization
/// verbatim.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Sets up the save directory at the platform's config location.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "wayfarer").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// A save manager writing to an explicit path (tests, simulators).
    pub fn at_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Saves the state to disk.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized exploration state (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, state: &ExplorationState) -> io::Result<()> {
        let data = bincode::serialize(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
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

    /// Loads and verifies the state from disk.
    pub fn load(&self) -> io::Result<ExplorationState> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
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
        let checksum = hasher.finalize();
        if checksum.as_slice() != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Save file checksum mismatch",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::AreaId;
    use std::env;

    fn temp_save_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("wayfarer-test-{name}-{}.dat", std::process::id()))
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_save_path("round-trip");
        let manager = SaveManager::at_path(path.clone());

        let mut state = ExplorationState::new("save-seed");
        state.rolls.draw_unit("before-save");
        state.knowledge.mark_area_known(AreaId::new(1, 4));

        manager.save(&state).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.rolls.counter(), 1);
        assert_eq!(loaded.rolls.seed(), "save-seed");
        assert!(loaded.knowledge.is_area_known(AreaId::new(1, 4)));
        assert_eq!(loaded.world.areas().count(), state.world.areas().count());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupted_save_is_rejected() {
        let path = temp_save_path("corrupt");
        let manager = SaveManager::at_path(path.clone());

        let state = ExplorationState::new("save-seed");
        manager.save(&state).unwrap();

        // Flip a byte in the payload region.
        let mut bytes = fs::read(&path).unwrap();
        bytes[20] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        assert!(manager.load().is_err());
        let _ = fs::remove_file(path);
    }
}
