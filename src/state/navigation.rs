/// Screen graph for the application window
///
/// `ContactList` is the root. `AddContact` and `ContactDetail` are pushed
/// on top of it; a successful submission resets history to the root.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ContactList,
    AddContact,
    /// Read-only view of one contact, by ID
    ContactDetail(i64),
}

impl Screen {
    /// Route name, e.g. `contactDetail/3`
    pub fn route(&self) -> String {
        match self {
            Screen::ContactList => "contactList".to_string(),
            Screen::AddContact => "addContact".to_string(),
            Screen::ContactDetail(id) => format!("contactDetail/{}", id),
        }
    }
}

/// Navigation history stack, never empty
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            history: vec![Screen::ContactList],
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        // history always holds at least the root
        *self.history.last().unwrap_or(&Screen::ContactList)
    }

    /// Push a screen onto the history
    pub fn navigate(&mut self, screen: Screen) {
        log::debug!("navigate -> {}", screen.route());
        self.history.push(screen);
    }

    /// Go to `screen` and drop all prior history
    pub fn navigate_to_root(&mut self, screen: Screen) {
        log::debug!("navigate (clear history) -> {}", screen.route());
        self.history.clear();
        self.history.push(screen);
    }

    /// Pop the current screen. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}
