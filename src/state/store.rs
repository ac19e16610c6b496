use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::watch;

use super::data::{Contact, NewContact};

/// Name of the database file inside the data directory
pub const DATABASE_FILE: &str = "contact_database.db";

/// Live, ordered view of every stored contact.
///
/// `borrow()` gives the current snapshot; `changed()` resolves after the
/// next insert.
pub type ContactsObserver = watch::Receiver<Vec<Contact>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("database connection lock was poisoned")]
    Poisoned,
}

/// The ContactStore manages the SQLite contact database.
/// It owns the rows and broadcasts a fresh snapshot after every insert.
pub struct ContactStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
    snapshot: watch::Sender<Vec<Contact>>,
}

impl ContactStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        log::info!("Database opened at: {}", path.display());

        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, db_path: Option<PathBuf>) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        let contacts = load_all(&conn)?;
        let (snapshot, _) = watch::channel(contacts);

        Ok(ContactStore {
            conn: Mutex::new(conn),
            db_path,
            snapshot,
        })
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Number of contacts in the database
    pub fn contact_count(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Append a contact and return its new ID.
    ///
    /// Fields are stored as given; empty strings are valid.
    pub fn insert(&self, contact: NewContact) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO contacts (name, phoneNumber, email, image) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                &contact.name,
                &contact.phone_number,
                &contact.email,
                &contact.image,
            ],
        )?;
        let id = conn.last_insert_rowid();

        log::info!("Added contact {} ({:?})", id, contact.name);

        // Publish while the connection is still locked so concurrent
        // inserts reach the snapshot in id order
        let contact = contact.with_id(id);
        self.snapshot.send_modify(|contacts| contacts.push(contact));
        drop(conn);

        Ok(id)
    }

    /// Subscribe to the live contact list
    pub fn observe_all(&self) -> ContactsObserver {
        self.snapshot.subscribe()
    }
}

/// Create the contacts table if it doesn't exist.
/// The schema is fixed; there is no migration path.
fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contacts (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            phoneNumber     TEXT NOT NULL,
            email           TEXT NOT NULL,
            image           TEXT NOT NULL
        )",
        [],
    )?;

    log::debug!("Database schema initialized");
    Ok(())
}

fn load_all(conn: &Connection) -> Result<Vec<Contact>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT id, name, phoneNumber, email, image FROM contacts ORDER BY id ASC")?;

    let contact_iter = stmt.query_map([], |row| {
        Ok(Contact {
            id: row.get(0)?,
            name: row.get(1)?,
            phone_number: row.get(2)?,
            email: row.get(3)?,
            image: row.get(4)?,
        })
    })?;

    let mut contacts = Vec::new();
    for contact in contact_iter {
        contacts.push(contact?);
    }

    Ok(contacts)
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
