//! Enrollment aggregate assembled across the pet, photo and owner screens.

use crate::{
    domain::{DogSex, ImagePayload, PhotoSlot, PHOTO_COUNT},
    error::{IncompleteEnrollment, MissingField},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl Owner {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    pub name: String,
    pub breed: String,
    pub birth_year: u16,
    pub sex: DogSex,
    pub profile_image: ImagePayload,
}

/// The five nose photos, in capture order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSet([ImagePayload; PHOTO_COUNT]);

impl PhotoSet {
    pub fn new(photos: [ImagePayload; PHOTO_COUNT]) -> Self {
        Self(photos)
    }

    pub fn into_images(self) -> impl Iterator<Item = (PhotoSlot, ImagePayload)> {
        PhotoSlot::ALL.into_iter().zip(self.0)
    }
}

/// Fully present payload handed to the registration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    pub owner: Owner,
    pub dog: Dog,
    pub photos: PhotoSet,
}

/// Point-in-time view of the enrollment in progress. Every `with_*` call returns a
/// new snapshot and leaves the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentSnapshot {
    owner: Option<Owner>,
    dog: Option<Dog>,
    photos: [Option<ImagePayload>; PHOTO_COUNT],
}

impl EnrollmentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub fn dog(&self) -> Option<&Dog> {
        self.dog.as_ref()
    }

    pub fn dog_name(&self) -> Option<&str> {
        self.dog.as_ref().map(|dog| dog.name.as_str())
    }

    pub fn photo(&self, slot: PhotoSlot) -> Option<&ImagePayload> {
        self.photos[slot.index()].as_ref()
    }

    pub fn with_owner(&self, owner: Owner) -> Self {
        Self {
            owner: Some(owner),
            ..self.clone()
        }
    }

    pub fn with_dog(&self, dog: Dog) -> Self {
        Self {
            dog: Some(dog),
            ..self.clone()
        }
    }

    pub fn with_photo(&self, slot: PhotoSlot, image: ImagePayload) -> Self {
        let mut next = self.clone();
        next.photos[slot.index()] = Some(image);
        next
    }

    /// Lists every missing piece in owner, dog, photo order. Empty means complete.
    pub fn validate(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.owner.is_none() {
            missing.push(MissingField::Owner);
        }
        if self.dog.is_none() {
            missing.push(MissingField::Dog);
        }
        missing.extend(
            PhotoSlot::ALL
                .into_iter()
                .filter(|slot| self.photos[slot.index()].is_none())
                .map(MissingField::Photo),
        );
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn to_request(&self) -> Result<EnrollmentRequest, IncompleteEnrollment> {
        let missing = self.validate();
        if !missing.is_empty() {
            return Err(IncompleteEnrollment::new(missing));
        }

        match (&self.owner, &self.dog, &self.photos) {
            (
                Some(owner),
                Some(dog),
                [Some(first), Some(second), Some(third), Some(fourth), Some(fifth)],
            ) => Ok(EnrollmentRequest {
                owner: owner.clone(),
                dog: dog.clone(),
                photos: PhotoSet::new([
                    first.clone(),
                    second.clone(),
                    third.clone(),
                    fourth.clone(),
                    fifth.clone(),
                ]),
            }),
            _ => Err(IncompleteEnrollment::new(self.validate())),
        }
    }
}
