use std::path::PathBuf;

use crate::import::ImportError;

/// In-progress state of the "Add contact" screen
#[derive(Debug, Clone, Default)]
pub struct AddContactForm {
    /// Photo picked by the user, not yet copied
    pub image: Option<PathBuf>,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

/// Everything needed to import the photo and write the contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub image: PathBuf,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl AddContactForm {
    /// Build a submission. A photo is required; text fields may be empty.
    pub fn submission(&self) -> Result<Submission, ImportError> {
        let image = self.image.clone().ok_or(ImportError::NoImageSelected)?;

        Ok(Submission {
            image,
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
