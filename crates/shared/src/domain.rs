use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(SubmissionId);
id_newtype!(LoadingHandle);

pub const PHOTO_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DogSex {
    Male,
    Female,
}

impl DogSex {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSlot {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl PhotoSlot {
    pub const ALL: [PhotoSlot; PHOTO_COUNT] = [
        PhotoSlot::First,
        PhotoSlot::Second,
        PhotoSlot::Third,
        PhotoSlot::Fourth,
        PhotoSlot::Fifth,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
            Self::Fourth => 3,
            Self::Fifth => 4,
        }
    }

    /// Multipart part name the registration service expects for this nose photo.
    pub fn form_field(self) -> &'static str {
        match self {
            Self::First => "firstDogNoseImage",
            Self::Second => "secondDogNoseImage",
            Self::Third => "thirdDogNoseImage",
            Self::Fourth => "fourthDogNoseImage",
            Self::Fifth => "fifthDogNoseImage",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}
