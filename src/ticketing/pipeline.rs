use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::models::category::{Gender, TicketCategory};
use crate::models::ticket::TicketRecord;
use crate::pricing::PriceTable;
use crate::ticketing::render::{self, RenderOptions, RenderedTicket};
use crate::ticketing::{qr, TicketError};

const MAX_AGE: u8 = 120;

/// Lifecycle of one visitor ticket purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Collecting,
    Submitted,
    Rendered,
    Downloaded,
    Dismissed,
}

/// The visitor form while it is being filled in.
#[derive(Debug, Clone, Default)]
pub struct TicketForm {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub category: Option<TicketCategory>,
    pub visit_date: Option<NaiveDate>,
}

/// File name and PNG bytes handed to the download control.
#[derive(Debug, Clone)]
pub struct TicketDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The individual ticket pipeline: collects and validates form input, issues
/// the immutable [`TicketRecord`] on submission, renders the QR-carrying
/// artwork, and hands out the PNG download. One instance drives one form;
/// submitting again replaces the previous ticket instead of stacking a new
/// one next to it.
pub struct TicketPipeline {
    prices: PriceTable,
    options: RenderOptions,
    form: TicketForm,
    record: Option<TicketRecord>,
    artwork: Option<RenderedTicket>,
    state: PipelineState,
}

impl TicketPipeline {
    pub fn new(prices: PriceTable, options: RenderOptions) -> Self {
        Self {
            prices,
            options,
            form: TicketForm::default(),
            record: None,
            artwork: None,
            state: PipelineState::Collecting,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn form(&self) -> &TicketForm {
        &self.form
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    /// Out-of-range ages are clamped to [0, 120] rather than rejected,
    /// mirroring how the form corrects the field while typing.
    pub fn set_age(&mut self, age: i64) {
        self.form.age = age.clamp(0, i64::from(MAX_AGE)) as u8;
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.form.gender = gender;
    }

    pub fn select_category(&mut self, category: TicketCategory) {
        self.form.category = Some(category);
    }

    /// Stores the visit date if it is today or later; a date in the past is
    /// rejected and the field cleared, as if the form had wiped the input.
    pub fn set_visit_date(&mut self, date: NaiveDate) -> Result<(), TicketError> {
        self.set_visit_date_from(date, Local::now().date_naive())
    }

    fn set_visit_date_from(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), TicketError> {
        if date < today {
            self.form.visit_date = None;
            return Err(TicketError::InvalidInput("Please select a future date"));
        }
        self.form.visit_date = Some(date);
        Ok(())
    }

    /// Issues the ticket from the collected form, capturing the purchase
    /// instant. Any previously issued ticket and its artwork are replaced.
    pub fn submit(&mut self) -> Result<&TicketRecord, TicketError> {
        let category = self
            .form
            .category
            .ok_or(TicketError::InvalidInput("Please select a ticket category"))?;
        let visit_date = self
            .form
            .visit_date
            .ok_or(TicketError::InvalidInput("Please select a visit date"))?;
        // The date was checked when entered; re-check in case the day rolled
        // over while the form sat open.
        if visit_date < Local::now().date_naive() {
            self.form.visit_date = None;
            return Err(TicketError::InvalidInput("Please select a future date"));
        }

        let record = TicketRecord::issue(
            self.form.name.clone(),
            self.form.age,
            self.form.gender,
            category,
            visit_date,
            &self.prices,
        );
        debug!(ticket = %record.id, category = %record.category, "ticket issued");

        self.artwork = None;
        self.state = PipelineState::Submitted;
        Ok(&*self.record.insert(record))
    }

    /// Encodes the QR payload and composites the artwork on the blocking
    /// pool, then waits for that work to finish; the state only advances
    /// once the image actually exists. Dropping the future abandons the
    /// render.
    pub async fn render(&mut self) -> Result<&RenderedTicket, TicketError> {
        let record = match (self.state, &self.record) {
            (PipelineState::Submitted | PipelineState::Rendered, Some(record)) => record.clone(),
            _ => return Err(TicketError::InvalidState("render")),
        };

        let prices = self.prices.clone();
        let options = self.options.clone();
        let file_name = record.file_name();

        let image = tokio::task::spawn_blocking(move || {
            let qr = qr::encode(&record, options.qr_size)?;
            Ok::<_, TicketError>(render::compose(&record, &prices, &qr, &options))
        })
        .await
        .map_err(|e| TicketError::Render(e.to_string()))??;

        self.state = PipelineState::Rendered;
        Ok(&*self.artwork.insert(RenderedTicket { file_name, image }))
    }

    pub fn rendered(&self) -> Option<&RenderedTicket> {
        self.artwork.as_ref()
    }

    /// PNG bytes and file name for the download control.
    pub fn download(&mut self) -> Result<TicketDownload, TicketError> {
        if self.state != PipelineState::Rendered {
            return Err(TicketError::InvalidState("download"));
        }
        let artwork = self
            .artwork
            .as_ref()
            .ok_or(TicketError::InvalidState("download"))?;
        let download = TicketDownload {
            file_name: artwork.file_name.clone(),
            bytes: artwork.png_bytes()?,
        };
        self.state = PipelineState::Downloaded;
        Ok(download)
    }

    /// Closes the preview: the record and artwork are discarded, nothing is
    /// persisted.
    pub fn dismiss(&mut self) {
        self.record = None;
        self.artwork = None;
        self.state = PipelineState::Dismissed;
    }
}
