use std::sync::Arc;

use super::data::NewContact;
use super::store::{ContactStore, ContactsObserver, StoreError};

/// Boundary between the view model and the storage technology
#[derive(Debug, Clone)]
pub struct ContactRepository {
    store: Arc<ContactStore>,
}

impl ContactRepository {
    pub fn new(store: Arc<ContactStore>) -> Self {
        Self { store }
    }

    pub fn add_contact(
        &self,
        image_path: &str,
        name: &str,
        phone_number: &str,
        email: &str,
    ) -> Result<i64, StoreError> {
        self.store.insert(NewContact {
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            email: email.to_string(),
            image: image_path.to_string(),
        })
    }

    pub fn all_contacts(&self) -> ContactsObserver {
        self.store.observe_all()
    }
}
