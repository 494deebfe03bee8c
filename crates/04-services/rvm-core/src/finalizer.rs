//! Session close: receipt or donation.

use chrono::Utc;
use log::info;
use rvm_abi::{CatalogError, CharityCatalog, DonationRecord, Receipt, SessionStatsSink};
use uuid::Uuid;

use crate::controller::MachineStateController;
use crate::outcome::Closing;

/// Borrow of the controller that closes the open session.
///
/// Both close paths check for a non-empty session before touching anything,
/// forward the session to an optional statistics sink, and then reset it.
pub struct TransactionFinalizer<'a> {
    machine: &'a mut MachineStateController,
}

impl<'a> TransactionFinalizer<'a> {
    pub(crate) fn new(machine: &'a mut MachineStateController) -> Self {
        Self { machine }
    }

    pub fn close_with_receipt(
        self,
        stats: Option<&mut dyn SessionStatsSink>,
    ) -> Closing<Receipt> {
        let session = self.machine.session();
        if session.is_empty() {
            info!("receipt requested with nothing to process");
            return Closing::NothingToProcess;
        }
        let receipt = Receipt {
            id: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
            items: *session.per_material(),
            total: session.total_value(),
        };
        self.finish(stats);
        info!(
            "receipt {} issued for {} items worth {}",
            receipt.id,
            receipt.item_count(),
            receipt.total
        );
        Closing::Closed(receipt)
    }

    /// Donates the session value to the charity at 1-based `index`.
    ///
    /// An unknown index leaves the session untouched.
    pub fn close_with_donation<C>(
        self,
        catalog: &C,
        index: usize,
        stats: Option<&mut dyn SessionStatsSink>,
    ) -> Result<Closing<DonationRecord>, CatalogError>
    where
        C: CharityCatalog + ?Sized,
    {
        let session = self.machine.session();
        if session.is_empty() {
            info!("donation requested with nothing to process");
            return Ok(Closing::NothingToProcess);
        }
        let charity = catalog.resolve(index)?;
        let record = DonationRecord {
            id: Uuid::new_v4().to_string(),
            donated_at: Utc::now(),
            charity: charity.clone(),
            items: *session.per_material(),
            amount: session.total_value(),
        };
        self.finish(stats);
        info!("donated {} to {}", record.amount, record.charity.name);
        Ok(Closing::Closed(record))
    }

    fn finish(self, stats: Option<&mut dyn SessionStatsSink>) {
        if let Some(sink) = stats {
            let session = self.machine.session();
            sink.record_session(session.per_material(), session.total_value());
        }
        self.machine.reset_session();
    }
}
