//! Recurring template maintenance and the occurrence materialization run.

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use outlay_domain::RecurringExpenseTemplate;

use crate::error::{CoreError, Result};
use crate::expense_service::ExpenseService;
use crate::ledger::Ledger;
use crate::schedule::due_occurrences;
use crate::time::Clock;

/// One template whose catch-up stopped early, and where it stopped.
#[derive(Debug)]
pub struct TemplateFailure {
    pub template_id: Uuid,
    pub occurrence: NaiveDate,
    pub error: CoreError,
}

/// Outcome of a materialization run across every active template.
#[derive(Debug, Default)]
pub struct RecurrenceRunReport {
    /// Ids of the expenses posted, across all templates.
    pub posted: Vec<Uuid>,
    /// Per-template failures; these never abort sibling templates.
    pub failures: Vec<TemplateFailure>,
}

impl RecurrenceRunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Maintains recurring templates and materializes their due occurrences.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Adds a template after validating its amount, account, and date range.
    pub fn add(ledger: &mut Ledger, template: RecurringExpenseTemplate) -> Result<Uuid> {
        Self::validate(ledger, &template)?;
        let id = template.id;
        ledger.templates.push(template);
        ledger.touch();
        Ok(id)
    }

    /// Rewrites a template's definition, preserving its processed marker.
    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: RecurringExpenseTemplate) -> Result<()> {
        Self::validate(ledger, &changes)?;
        let template = ledger
            .template_mut(id)
            .ok_or(CoreError::TemplateNotFound(id))?;
        template.amount = changes.amount;
        template.description = changes.description;
        template.category = changes.category;
        template.start_date = changes.start_date;
        template.end_date = changes.end_date;
        template.frequency = changes.frequency;
        template.account_id = changes.account_id;
        ledger.touch();
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        let before = ledger.templates.len();
        ledger.templates.retain(|template| template.id != id);
        if ledger.templates.len() == before {
            return Err(CoreError::TemplateNotFound(id));
        }
        ledger.touch();
        Ok(())
    }

    pub fn for_account(ledger: &Ledger, account_id: Uuid) -> Vec<&RecurringExpenseTemplate> {
        ledger
            .templates
            .iter()
            .filter(|template| template.account_id == account_id)
            .collect()
    }

    /// Materializes every due occurrence as of the clock's current date.
    ///
    /// Intended to run once per session start; safe to invoke on demand.
    pub fn process_due_today(ledger: &mut Ledger, clock: &dyn Clock) -> RecurrenceRunReport {
        Self::process_due(ledger, clock.today())
    }

    /// Materializes every due occurrence across all templates.
    ///
    /// Occurrences for one template are applied strictly in chronological
    /// order, each expense dated at its occurrence date. A posting failure
    /// halts that template's catch-up without advancing the processed
    /// marker past the failed occurrence; later templates still run. Each
    /// successful posting advances the marker immediately, so a run
    /// abandoned between templates leaves prior templates fully committed.
    pub fn process_due(ledger: &mut Ledger, today: NaiveDate) -> RecurrenceRunReport {
        let mut report = RecurrenceRunReport::default();
        let template_ids: Vec<Uuid> = ledger.templates.iter().map(|template| template.id).collect();

        for template_id in template_ids {
            let Some(template) = ledger.template(template_id) else {
                continue;
            };
            let template = template.clone();
            for occurrence in due_occurrences(&template, today) {
                match ExpenseService::post(ledger, template.materialize(occurrence)) {
                    Ok(expense_id) => {
                        report.posted.push(expense_id);
                        if let Some(stored) = ledger.template_mut(template_id) {
                            stored.last_processed = Some(occurrence);
                        }
                        ledger.touch();
                    }
                    Err(error) => {
                        warn!(
                            "recurring template {} halted at {}: {}",
                            template_id, occurrence, error
                        );
                        report.failures.push(TemplateFailure {
                            template_id,
                            occurrence,
                            error,
                        });
                        break;
                    }
                }
            }
        }

        debug!(
            "recurrence run posted {} expense(s), {} template(s) halted",
            report.posted.len(),
            report.failures.len()
        );
        report
    }

    fn validate(ledger: &Ledger, template: &RecurringExpenseTemplate) -> Result<()> {
        if !template.amount.is_positive() {
            return Err(CoreError::InvalidAmount(template.amount));
        }
        if ledger.account(template.account_id).is_none() {
            return Err(CoreError::AccountNotFound(template.account_id));
        }
        if let Some(end) = template.end_date {
            if end < template.start_date {
                return Err(CoreError::Validation(
                    "template end date precedes its start date".into(),
                ));
            }
        }
        Ok(())
    }
}
