use iced::widget::{button, column, container, image, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod import;
mod state;

use import::picker;
use import::ImportError;
use state::data::Contact;
use state::form::{AddContactForm, Submission};
use state::navigation::{Navigator, Screen};
use state::repository::ContactRepository;
use state::store::ContactStore;
use state::view_model::ContactViewModel;

/// Main application state
struct ContactsApp {
    view_model: ContactViewModel,
    /// Latest snapshot pushed by the store
    contacts: Vec<Contact>,
    navigator: Navigator,
    form: AddContactForm,
    /// Private directory that imported photos are copied into
    images_dir: PathBuf,
    /// One-line status shown on the add-contact screen
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The store pushed a new contact list
    ContactsChanged(Vec<Contact>),
    OpenAddContact,
    OpenContact(i64),
    Back,
    /// User clicked "Choose Image"
    ChooseImage,
    ImagePicked(Option<PathBuf>),
    NameChanged(String),
    PhoneChanged(String),
    EmailChanged(String),
    /// User clicked "Add Contact"
    Submit,
    /// Background photo copy finished
    ImportComplete(Submission, Result<PathBuf, Arc<ImportError>>),
}

impl ContactsApp {
    fn new() -> (Self, Task<Message>) {
        let paths = config::load_config().paths();

        // The app cannot function without its database
        let store = ContactStore::open(&paths.database)
            .expect("Failed to initialize database. Check permissions and disk space.");

        let contact_count = store.contact_count().unwrap_or(0);
        log::info!(
            "Contacts initialized with {} contacts from {}",
            contact_count,
            store.path().unwrap_or(&paths.database).display()
        );
        log::info!("Photos are stored in {}", paths.images_dir.display());

        let view_model = ContactViewModel::new(ContactRepository::new(Arc::new(store)));
        let contacts = view_model.contacts();

        (
            ContactsApp {
                view_model,
                contacts,
                navigator: Navigator::new(),
                form: AddContactForm::default(),
                images_dir: paths.images_dir,
                status: String::new(),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ContactsChanged(contacts) => {
                log::debug!("Contact list now has {} entries", contacts.len());
                self.contacts = contacts;
            }
            Message::OpenAddContact => {
                self.status.clear();
                self.navigator.navigate(Screen::AddContact);
            }
            Message::OpenContact(id) => {
                self.navigator.navigate(Screen::ContactDetail(id));
            }
            Message::Back => {
                self.navigator.back();
            }
            Message::ChooseImage => {
                return Task::perform(picker::pick_image(), Message::ImagePicked);
            }
            Message::ImagePicked(Some(path)) => {
                if picker::is_image_path(&path) {
                    self.form.image = Some(path);
                } else {
                    log::warn!("Ignoring non-image pick: {}", path.display());
                }
            }
            Message::ImagePicked(None) => {
                log::debug!("Image picker cancelled");
            }
            Message::NameChanged(name) => self.form.name = name,
            Message::PhoneChanged(phone) => self.form.phone_number = phone,
            Message::EmailChanged(email) => self.form.email = email,
            Message::Submit => match self.form.submission() {
                Ok(submission) => {
                    self.status = "Saving...".to_string();
                    return Task::perform(
                        import::import_image_async(
                            submission.image.clone(),
                            self.images_dir.clone(),
                            submission.name.clone(),
                        ),
                        move |result| {
                            Message::ImportComplete(submission.clone(), result.map_err(Arc::new))
                        },
                    );
                }
                Err(e) => {
                    log::debug!("Submit ignored: {}", e);
                    self.status = "Choose an image first.".to_string();
                }
            },
            Message::ImportComplete(submission, Ok(path)) => {
                self.view_model.add_contact(
                    &path.to_string_lossy(),
                    &submission.name,
                    &submission.phone_number,
                    &submission.email,
                );
                self.form.clear();
                self.status.clear();
                self.navigator.navigate_to_root(Screen::ContactList);
            }
            Message::ImportComplete(submission, Err(e)) => {
                log::warn!("Could not import photo for {:?}: {}", submission.name, e);
                self.status = format!("Could not save photo: {}", e);
            }
        }

        Task::none()
    }

    /// Push-based contact updates from the store
    fn subscription(&self) -> Subscription<Message> {
        let observer = self.view_model.all_contacts();

        Subscription::run_with_id(
            "contacts",
            iced::futures::stream::unfold(observer, |mut observer| async move {
                observer.changed().await.ok()?;
                let contacts = observer.borrow_and_update().clone();
                Some((Message::ContactsChanged(contacts), observer))
            }),
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let content = match self.navigator.current() {
            Screen::ContactList => self.contact_list_view(),
            Screen::AddContact => self.add_contact_view(),
            Screen::ContactDetail(id) => self.contact_detail_view(id),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    fn contact_list_view(&self) -> Element<'_, Message> {
        let header = row![
            text("Contacts").size(28).width(Length::Fill),
            button("Add Contact")
                .on_press(Message::OpenAddContact)
                .padding(10),
        ]
        .align_y(Alignment::Center);

        let items = self.contacts.iter().map(|contact| {
            button(
                row![
                    photo(&contact.image, 50.0),
                    text(&contact.name).size(18),
                ]
                .spacing(16)
                .align_y(Alignment::Center),
            )
            .on_press(Message::OpenContact(contact.id))
            .width(Length::Fill)
            .padding(8)
            .into()
        });

        let list = Column::with_children(items).spacing(8);

        column![header, scrollable(list).height(Length::Fill)]
            .spacing(20)
            .into()
    }

    fn add_contact_view(&self) -> Element<'_, Message> {
        let mut form: Column<Message> = column![row![
            button("Back").on_press(Message::Back),
            text("Add contact").size(28),
        ]
        .spacing(16)
        .align_y(Alignment::Center)]
        .spacing(12)
        .align_x(Alignment::Center);

        if let Some(picked) = &self.form.image {
            form = form.push(image(image::Handle::from_path(picked)).width(Length::Fixed(128.0)));
        }

        form.push(button("Choose Image").on_press(Message::ChooseImage).padding(10))
            .push(text_input("Name", &self.form.name).on_input(Message::NameChanged).padding(8))
            .push(
                text_input("Phone Number", &self.form.phone_number)
                    .on_input(Message::PhoneChanged)
                    .padding(8),
            )
            .push(text_input("Email", &self.form.email).on_input(Message::EmailChanged).padding(8))
            .push(button("Add Contact").on_press(Message::Submit).padding(10))
            .push(text(&self.status).size(14))
            .into()
    }

    fn contact_detail_view(&self, id: i64) -> Element<'_, Message> {
        let back = button("Back").on_press(Message::Back);

        let Some(contact) = self.view_model.contact(id) else {
            return column![back, text("Contact not found")].spacing(20).into();
        };

        column![
            back,
            photo(&contact.image, 128.0),
            text(contact.name).size(28),
            text(format!("Phone: {}", contact.phone_number)),
            text(format!("Email: {}", contact.email)),
        ]
        .spacing(12)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Square contact photo loaded from private storage
fn photo<'a>(path: &str, size: f32) -> Element<'a, Message> {
    image(image::Handle::from_path(path))
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .into()
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Contacts", ContactsApp::update, ContactsApp::view)
        .subscription(ContactsApp::subscription)
        .theme(ContactsApp::theme)
        .centered()
        .run_with(ContactsApp::new)
}
