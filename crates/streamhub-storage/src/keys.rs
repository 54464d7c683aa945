//! Shared key generation for storage providers.
//!
//! Key format: `{owner_id}/{filename}`. Two uploads of the same filename by the
//! same owner produce the same key, so the second overwrites the first object.

use uuid::Uuid;

/// Generate the storage key for an owner's file.
pub fn media_key(owner_id: Uuid, filename: &str) -> String {
    format!("{}/{}", owner_id, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_namespaced_by_owner() {
        let owner = Uuid::new_v4();
        assert_eq!(media_key(owner, "song.mp3"), format!("{}/song.mp3", owner));
    }

    #[test]
    fn same_owner_and_filename_collide() {
        let owner = Uuid::new_v4();
        assert_eq!(media_key(owner, "a.mp4"), media_key(owner, "a.mp4"));
        assert_ne!(media_key(owner, "a.mp4"), media_key(Uuid::new_v4(), "a.mp4"));
    }

    /// Every name the upload path accepts must land at exactly its key, so the record's
    /// key and the object's location agree.
    #[cfg(feature = "storage-cloud")]
    #[test]
    fn accepted_filenames_survive_object_store_paths() {
        use object_store::path::Path;
        use streamhub_core::validation::storage_filename;

        let owner = Uuid::new_v4();
        let mut names: Vec<String> = (0x20u8..0x7f)
            .map(|b| format!("a{}b.mp3", b as char))
            .collect();
        names.extend(["song..final.mp3", "take 1.wav", "u/v/clip.mkv"].map(String::from));

        let mut accepted = 0;
        for raw in names {
            let Ok(name) = storage_filename(&raw) else {
                continue;
            };
            accepted += 1;
            let key = media_key(owner, &name);
            assert_eq!(Path::from(key.as_str()).as_ref(), key, "{:?}", raw);
        }
        assert!(accepted > 70);
    }
}
