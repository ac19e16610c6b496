/// View-state holder for the contact screens
///
/// Adapts repository operations to the UI's message/subscription model.
/// Holds no contact data of its own beyond the observed snapshot.
use super::data::Contact;
use super::repository::ContactRepository;
use super::store::ContactsObserver;

#[derive(Debug, Clone)]
pub struct ContactViewModel {
    repository: ContactRepository,
    contacts: ContactsObserver,
}

impl ContactViewModel {
    pub fn new(repository: ContactRepository) -> Self {
        let contacts = repository.all_contacts();
        Self {
            repository,
            contacts,
        }
    }

    /// Persist one contact per call. Failures are logged, not returned.
    pub fn add_contact(&self, image_path: &str, name: &str, phone_number: &str, email: &str) {
        if let Err(e) = self
            .repository
            .add_contact(image_path, name, phone_number, email)
        {
            log::error!("Failed to add contact {:?}: {}", name, e);
        }
    }

    /// Live contact list for the presentation layer
    pub fn all_contacts(&self) -> ContactsObserver {
        self.repository.all_contacts()
    }

    /// Current snapshot, in insertion order
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.borrow().clone()
    }

    /// Look a contact up in the current snapshot (detail screen)
    pub fn contact(&self, id: i64) -> Option<Contact> {
        self.contacts.borrow().iter().find(|c| c.id == id).cloned()
    }
}
