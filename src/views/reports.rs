use hostel_client::{raw::reports, Context};
use hostel_shared::report::{
    handle::{ReportDescriptor, ResolveDescriptor},
    Report, ReportStatus,
};

use super::{required, Listing, Page};
use crate::{guard, Error};

/// Disputes a student filed.
pub struct StudentReports {
    cx: Context,
    listing: Listing<Report>,
}

impl StudentReports {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::StudentReports)?;
        Ok(Self {
            cx,
            listing: Listing::default(),
        })
    }

    /// Files a report about a booking's hostel and its manager.
    pub async fn file(&mut self, booking: &str, description: String) -> Result<Report, Error> {
        required(booking, "Select a booking")?;
        required(&description, "Describe the problem")?;

        tracing::info!(booking, "filing report");
        let result = self
            .cx
            .call(reports::File(ReportDescriptor {
                booking_id: booking.to_owned(),
                description,
            }))
            .await;
        self.settle(result, "Failed to submit report").await
    }
}

#[async_trait::async_trait]
impl Page for StudentReports {
    type Item = Report;
    const LOAD_FALLBACK: &'static str = "Failed to load reports";

    fn listing(&self) -> &Listing<Report> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Report> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Report>> {
        self.cx.call(reports::Mine).await
    }
}

pub struct AdminReports {
    cx: Context,
    /// Server-side status selection, open reports by default.
    pub status: Option<ReportStatus>,
    listing: Listing<Report>,
}

impl AdminReports {
    pub fn new(cx: Context) -> Result<Self, Error> {
        guard::require(&cx.session, guard::Route::AdminReports)?;
        Ok(Self {
            cx,
            status: Some(ReportStatus::Open),
            listing: Listing::default(),
        })
    }

    /// Resolves a report. The server accepts this once per report.
    pub async fn resolve(
        &mut self,
        report: &str,
        decision: String,
        final_resolution: String,
    ) -> Result<Report, Error> {
        required(&decision, "Choose a decision")?;
        required(&final_resolution, "Describe the final resolution")?;

        tracing::info!(report, %decision, "resolving report");
        let result = self
            .cx
            .call(reports::Resolve {
                report: report.to_owned(),
                descriptor: ResolveDescriptor {
                    decision,
                    final_resolution,
                },
            })
            .await;
        self.settle(result, "Failed to resolve report").await
    }
}

#[async_trait::async_trait]
impl Page for AdminReports {
    type Item = Report;
    const LOAD_FALLBACK: &'static str = "Failed to load reports";

    fn listing(&self) -> &Listing<Report> {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing<Report> {
        &mut self.listing
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Report>> {
        self.cx
            .call(reports::List {
                status: self.status,
            })
            .await
    }
}
