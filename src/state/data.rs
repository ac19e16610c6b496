/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer and the UI layer.

/// A contact as stored in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Unique database ID, assigned on insert
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    /// Full path to the contact photo in private storage
    pub image: String,
}

/// A contact that has not been written yet (no ID)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewContact {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub image: String,
}

impl NewContact {
    /// Attach the ID the store assigned
    pub fn with_id(self, id: i64) -> Contact {
        Contact {
            id,
            name: self.name,
            phone_number: self.phone_number,
            email: self.email,
            image: self.image,
        }
    }
}
