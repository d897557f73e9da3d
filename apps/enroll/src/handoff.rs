//! Rebuilds the pet and photo hand-off snapshot from files on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use shared::{
    domain::{DogSex, ImagePayload, PhotoSlot, PHOTO_COUNT},
    enrollment::{Dog, EnrollmentSnapshot},
};

/// Dog profile as written by the pet registration screen. `profile_image` is resolved
/// relative to the profile file.
#[derive(Debug, Deserialize)]
struct DogProfile {
    name: String,
    breed: String,
    birth_year: u16,
    sex: DogSex,
    profile_image: PathBuf,
}

pub fn load_handoff(dog_profile: &Path, photos: &[PathBuf]) -> Result<EnrollmentSnapshot> {
    if photos.len() != PHOTO_COUNT {
        bail!(
            "expected {PHOTO_COUNT} nose photos, got {}",
            photos.len()
        );
    }

    let raw = fs::read_to_string(dog_profile)
        .with_context(|| format!("failed to read dog profile '{}'", dog_profile.display()))?;
    let profile: DogProfile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid dog profile '{}'", dog_profile.display()))?;

    let base_dir = dog_profile.parent().unwrap_or_else(|| Path::new("."));
    let profile_image = load_image(&base_dir.join(&profile.profile_image))?;

    let mut snapshot = EnrollmentSnapshot::new().with_dog(Dog {
        name: profile.name,
        breed: profile.breed,
        birth_year: profile.birth_year,
        sex: profile.sex,
        profile_image,
    });
    for (slot, path) in PhotoSlot::ALL.into_iter().zip(photos) {
        snapshot = snapshot.with_photo(slot, load_image(path)?);
    }
    Ok(snapshot)
}

pub fn load_image(path: &Path) -> Result<ImagePayload> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read image '{}'", path.display()))?;
    if bytes.is_empty() {
        bail!("image '{}' is empty", path.display());
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let image = ImagePayload::new(filename, bytes);
    Ok(match mime_guess::from_path(path).first_raw() {
        Some(mime) => image.with_mime_type(mime),
        None => image,
    })
}
