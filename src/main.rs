use iced::widget::image::Handle;
use iced::widget::{button, column, container, progress_bar, row, text, text_editor, Column, Image, Space};
use iced::{time, window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use chrono::Local;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod imaging;
mod inference;
mod state;
mod ui;

use config::Config;
use error::{GenerateError, SaveError};
use imaging::save;
use inference::{worker, InferenceClient};
use state::data::GeneratedImage;
use state::session::Session;
use ui::progress::Spinner;

/// Frame interval for the progress animation
const TICK: Duration = Duration::from_millis(30);

/// Main application state
struct TextToImage {
    config: Config,
    /// Shared HTTP client, or the reason it could not be built
    client: Result<InferenceClient, GenerateError>,
    /// Contents of the prompt box
    prompt: text_editor::Content,
    /// Current image, status text and in-flight requests
    session: Session,
    spinner: Spinner,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User typed in the prompt box
    PromptEdited(text_editor::Action),
    /// User clicked "Generate Image"
    Generate,
    /// A background generation finished
    Generated(Result<GeneratedImage, GenerateError>),
    /// User clicked "Save Image"
    Save,
    /// A background save finished
    Saved(Result<PathBuf, SaveError>),
    /// Progress animation frame
    Tick,
}

impl TextToImage {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        let client = InferenceClient::new(&config);

        match &client {
            Ok(client) => tracing::info!(endpoint = client.endpoint(), "🚀 text-to-image client ready"),
            Err(error) => tracing::error!(%error, "could not build HTTP client"),
        }
        if config.api_token.is_none() {
            tracing::warn!("HF_TOKEN is not set, requests will be anonymous");
        }

        (
            TextToImage {
                config,
                client,
                prompt: text_editor::Content::new(),
                session: Session::new(),
                spinner: Spinner::default(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PromptEdited(action) => {
                self.prompt.perform(action);
                Task::none()
            }
            Message::Generate => match self.start_generation() {
                Some(job) => Task::perform(job, Message::Generated),
                None => Task::none(),
            },
            Message::Generated(result) => {
                self.session.finish_generation(result);
                if !self.session.is_generating() {
                    self.spinner.reset();
                }
                Task::none()
            }
            Message::Save => match self.start_save() {
                Some(job) => Task::perform(job, Message::Saved),
                None => Task::none(),
            },
            Message::Saved(result) => {
                self.session.finish_save(result);
                Task::none()
            }
            Message::Tick => {
                self.spinner.advance();
                Task::none()
            }
        }
    }

    /// Validate the prompt and build the background generation job.
    /// `None` means nothing goes over the network.
    fn start_generation(
        &mut self,
    ) -> Option<impl Future<Output = Result<GeneratedImage, GenerateError>> + Send + 'static> {
        let prompt = self.session.begin_generation(&self.prompt.text())?;

        match &self.client {
            Ok(client) => Some(worker::generate(client.clone(), prompt)),
            Err(error) => {
                self.session.finish_generation(Err(error.clone()));
                None
            }
        }
    }

    /// Build the background job that writes the current image to disk
    fn start_save(&mut self) -> Option<impl Future<Output = Result<PathBuf, SaveError>> + Send + 'static> {
        let original = self.session.begin_save()?;
        Some(save::save_png_async(
            original,
            self.config.output_dir.clone(),
            Local::now(),
        ))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let prompt_section: Column<Message> = column![
            text("Text Prompt").size(14),
            text_editor(&self.prompt)
                .placeholder("Describe the image you want...")
                .on_action(Message::PromptEdited)
                .height(Length::Fixed(90.0))
                .size(15),
            button(text("Generate Image").size(15))
                .on_press(Message::Generate)
                .padding(10),
        ]
        .spacing(10)
        .align_x(Alignment::Center);

        let preview: Element<Message> = match self.session.current() {
            Some(generated) => {
                let (width, height) = generated.preview_size;
                column![
                    Image::<Handle>::new(generated.preview.clone())
                        .width(Length::Fixed(width as f32))
                        .height(Length::Fixed(height as f32)),
                    text(generated.prompt.as_str()).size(13),
                ]
                .spacing(6)
                .align_x(Alignment::Center)
                .into()
            }
            None => text("No image yet").size(16).into(),
        };

        let image_section: Column<Message> = column![
            text("Generated Image").size(14),
            container(preview)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(container::rounded_box),
            button(text("Save Image").size(15))
                .on_press(Message::Save)
                .padding(10),
        ]
        .spacing(10)
        .align_x(Alignment::Center);

        let status_row = row![
            text(self.session.status()).size(14),
            Space::with_width(Length::Fill),
            progress_bar(0.0..=100.0, self.spinner.value())
                .width(Length::Fixed(200.0))
                .height(Length::Fixed(10.0)),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let content = column![
            container(prompt_section)
                .padding(10)
                .width(Length::Fill)
                .style(container::bordered_box),
            container(image_section)
                .padding(10)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(container::bordered_box),
            status_row,
        ]
        .spacing(10)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Drive the progress bar only while a request is outstanding
    fn subscription(&self) -> Subscription<Message> {
        if self.session.is_generating() {
            time::every(TICK).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text_to_image=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "invalid configuration, falling back to defaults");
        Config::default()
    });

    iced::application(
        "AI Text to Image Generator",
        TextToImage::update,
        TextToImage::view,
    )
    .subscription(TextToImage::subscription)
    .theme(TextToImage::theme)
    .window(window::Settings {
        size: Size::new(1024.0, 768.0),
        min_size: Some(Size::new(800.0, 600.0)),
        resizable: true,
        ..window::Settings::default()
    })
    .centered()
    .run_with(move || TextToImage::new(config))
}
