//! The two sign-up widgets of the event page. An event shows exactly one:
//! the registration redirect when it has an external link, the booking form otherwise.

use tracing::error;
use uuid::Uuid;

use crate::api::ui::html::escape;
use crate::contract::{
    client::EventsApi,
    error::{BookingError, BookingErrorKind},
    model::NewBooking,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Unsubmitted,
    /// Terminal.
    Submitted,
}

/// Email sign-up form bound to one event.
#[derive(Debug, Clone)]
pub struct BookingForm {
    event_id: Uuid,
    slug: String,
    state: FormState,
    email: String,
    notice: Option<&'static str>,
}

impl BookingForm {
    pub fn new(event_id: Uuid, slug: impl Into<String>) -> Self {
        Self {
            event_id,
            slug: slug.into(),
            state: FormState::Unsubmitted,
            email: String::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Inline message shown after a failed submission.
    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    /// Submit an email through the booking action.
    ///
    /// Success moves the form to `Submitted`. A failure is logged, leaves the
    /// form `Unsubmitted` with the entered email kept, and sets a notice.
    /// Submitting an already submitted form does nothing.
    pub async fn submit(&mut self, api: &dyn EventsApi, email: &str) -> Result<(), BookingError> {
        if self.state == FormState::Submitted {
            return Ok(());
        }
        self.email = email.to_string();

        let outcome = api
            .create_booking(NewBooking {
                event_id: self.event_id,
                slug: self.slug.clone(),
                email: email.to_string(),
            })
            .await;
        self.apply(outcome.map(|_| ()))
    }

    /// Feed the outcome of a booking attempt made elsewhere into the form.
    pub fn apply(&mut self, outcome: Result<(), BookingError>) -> Result<(), BookingError> {
        match outcome {
            Ok(()) => {
                self.state = FormState::Submitted;
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                error!(slug = %self.slug, kind = ?e.kind(), "Error creating booking: {}", e);
                self.notice = Some(notice_for(e.kind()));
                Err(e)
            }
        }
    }

    pub fn render(&self) -> String {
        match self.state {
            FormState::Submitted => {
                r#"<div id="book-event"><p class="text-sm">Thank you for signing up!</p></div>"#
                    .to_string()
            }
            FormState::Unsubmitted => {
                let notice = self
                    .notice
                    .map(|n| format!(r#"<p class="form-error" role="alert">{}</p>"#, escape(n)))
                    .unwrap_or_default();
                format!(
                    r#"<div id="book-event">
<form method="post" action="/events/{slug}/book">
<input type="hidden" name="event_id" value="{event_id}">
<div>
<label for="email">Email Address</label>
<input id="email" name="email" type="email" placeholder="Enter email" value="{email}">
</div>
{notice}<button type="submit" class="button-submit">Submit</button>
</form>
</div>"#,
                    slug = escape(&self.slug),
                    event_id = self.event_id,
                    email = escape(&self.email),
                    notice = notice,
                )
            }
        }
    }
}

fn notice_for(kind: BookingErrorKind) -> &'static str {
    match kind {
        BookingErrorKind::Validation => "Please provide a valid email address.",
        BookingErrorKind::EventNotFound => "This event is no longer available for booking.",
        BookingErrorKind::Configuration | BookingErrorKind::Infrastructure => {
            "Booking is temporarily unavailable. Please try again later."
        }
    }
}

/// Redirect widget for events with an external sign-up page.
/// The link is not validated, only escaped.
pub fn render_registration(registration_link: &str) -> String {
    format!(
        r#"<div id="register-event">
<p>Go to the event website to sign up.</p>
<a class="button-submit" href="{link}" target="_blank" rel="noopener noreferrer">Visit Link</a>
</div>"#,
        link = escape(registration_link)
    )
}
