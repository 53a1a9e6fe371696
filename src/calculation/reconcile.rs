//! Schedule-vs-actual reconciliation.
//!
//! A reconciliation loads one company's time records, schedules, grace
//! policies and employees for a date range, then joins them per record:
//!
//! 1. Resolve the record's date key (record date, else clock-in date).
//! 2. Resolve its schedule for (employee, date).
//! 3. Compute worked and overtime hours.
//! 4. Classify clock-in, clock-out, break start and break end.
//!
//! Results are grouped by `yyyy-MM-dd` date key and then by employee id into
//! a values map and a parallel colors map. Bad rows are downgraded or
//! skipped, never surfaced as a failure.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::{EngineConfig, GraceDefaults};
use crate::error::EngineResult;
use crate::models::{
    BreakValues, DateRange, Employee, FieldColors, OutletGracePolicy, Reconciliation,
    RecordValues, Schedule, TimeRecord, date_key,
};
use crate::store::AttendanceStore;

use super::duration::{RecordHours, calculate_record_hours};
use super::grace::classify_record;
use super::schedule_resolver::ScheduleIndex;

/// Which records to reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileRequest {
    /// The company whose data is reconciled.
    pub company_id: i64,
    /// Restricts records, schedules and policies to one outlet.
    pub outlet_id: Option<i64>,
    /// The inclusive date range.
    pub range: DateRange,
}

impl ReconcileRequest {
    /// Creates a request.
    pub fn new(company_id: i64, outlet_id: Option<i64>, range: DateRange) -> Self {
        Self {
            company_id,
            outlet_id,
            range,
        }
    }
}

/// Everything one reconciliation reads from storage.
#[derive(Debug, Clone, Default)]
pub struct ReconcileBatch {
    /// Time records whose clock-in falls within the range.
    pub records: Vec<TimeRecord>,
    /// Candidate schedules within the range.
    pub schedules: Vec<Schedule>,
    /// Grace policies for the candidate outlets.
    pub policies: Vec<OutletGracePolicy>,
    /// The company's employees.
    pub employees: Vec<Employee>,
}

/// Loads a batch, issuing the four reads concurrently.
///
/// Fails with the first storage error; no partial batch is returned.
pub async fn load_batch<S: AttendanceStore>(
    store: &S,
    request: &ReconcileRequest,
) -> EngineResult<ReconcileBatch> {
    let outlet_ids = request.outlet_id.as_ref().map(std::slice::from_ref);

    let (records, schedules, policies, employees) = tokio::try_join!(
        store.find_time_records(request.company_id, request.outlet_id, request.range),
        store.find_schedules(request.company_id, request.outlet_id, request.range),
        store.find_grace_policies(request.company_id, outlet_ids),
        store.find_employees(request.company_id),
    )?;

    Ok(ReconcileBatch {
        records,
        schedules,
        policies,
        employees,
    })
}

/// Loads and reconciles a date range.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{ReconcileRequest, reconcile};
/// use timesheet_engine::config::EngineConfig;
/// use timesheet_engine::models::DateRange;
/// use timesheet_engine::store::InMemoryStore;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let store = InMemoryStore::new();
/// let request = ReconcileRequest::new(1000, None, DateRange::parse("2024-01-01", "2024-01-07").unwrap());
///
/// let result = runtime
///     .block_on(reconcile(&store, &EngineConfig::default(), &request))
///     .unwrap();
/// assert!(result.values.is_empty());
/// assert!(result.colors.is_empty());
/// ```
pub async fn reconcile<S: AttendanceStore>(
    store: &S,
    config: &EngineConfig,
    request: &ReconcileRequest,
) -> EngineResult<Reconciliation> {
    let batch = load_batch(store, request).await?;
    debug!(
        company_id = request.company_id,
        records = batch.records.len(),
        schedules = batch.schedules.len(),
        policies = batch.policies.len(),
        employees = batch.employees.len(),
        "Loaded reconciliation batch"
    );
    Ok(reconcile_batch(&batch, config))
}

/// Grace policy lookup by outlet, falling back to configured defaults.
struct GracePolicies<'a> {
    by_outlet: HashMap<i64, &'a OutletGracePolicy>,
    defaults: &'a GraceDefaults,
}

impl<'a> GracePolicies<'a> {
    fn new(policies: &'a [OutletGracePolicy], defaults: &'a GraceDefaults) -> Self {
        Self {
            by_outlet: policies.iter().map(|p| (p.outlet_id, p)).collect(),
            defaults,
        }
    }

    fn for_record(&self, record: &TimeRecord) -> Cow<'a, OutletGracePolicy> {
        match self.by_outlet.get(&record.outlet_id) {
            Some(policy) => Cow::Borrowed(*policy),
            None => Cow::Owned(OutletGracePolicy::from_defaults(
                record.outlet_id,
                record.company_id,
                self.defaults,
            )),
        }
    }
}

fn record_values(record: &TimeRecord, hours: RecordHours, employee_missing: bool) -> RecordValues {
    let breaks = record
        .breaks
        .iter()
        .zip(1u8..)
        .filter_map(|(slot, number)| {
            slot.as_ref().map(|b| BreakValues {
                slot: number,
                start: b.start.as_ref().map(|e| e.instant),
                end: b.end.as_ref().map(|e| e.instant),
                label: b.label.clone(),
                is_paid: b.is_paid,
                minutes: b.duration_minutes(),
            })
        })
        .collect();

    let [img1, img2, img3, img4, img5, img6, img7, img8] = record.images.clone();

    RecordValues {
        id: record.id,
        employee_id: record.employee_id,
        employee_missing,
        clock_in: record.clock_in.clone(),
        clock_out: record.clock_out.clone(),
        breaks,
        duration: hours.duration_hours,
        overtime: hours.overtime_hours,
        img1,
        img2,
        img3,
        img4,
        img5,
        img6,
        img7,
        img8,
    }
}

/// Reconciles an already loaded batch.
///
/// Records are visited in clock-in order. When two records share a date and
/// employee, the later one replaces the earlier in both maps.
pub fn reconcile_batch(batch: &ReconcileBatch, config: &EngineConfig) -> Reconciliation {
    let schedules = ScheduleIndex::build(&batch.schedules);
    let policies = GracePolicies::new(&batch.policies, &config.default_grace);
    let employees: HashSet<i64> = batch.employees.iter().map(|e| e.id).collect();

    let mut ordered: Vec<&TimeRecord> = batch.records.iter().collect();
    ordered.sort_by_key(|r| (r.clock_in_at(), r.id));

    let mut result = Reconciliation::default();

    for record in ordered {
        let Some(date) = record.date_key() else {
            warn!(
                record_id = record.id,
                employee_id = record.employee_id,
                "Time record has no date or clock-in, skipping"
            );
            result.skipped_records += 1;
            continue;
        };
        let key = date_key(date);

        let employee_missing = !employees.contains(&record.employee_id);
        let schedule = schedules.get(record.employee_id, date);
        let hours = calculate_record_hours(record, schedule, config);

        let colors = if employee_missing {
            warn!(
                record_id = record.id,
                employee_id = record.employee_id,
                "Employee not found, leaving record uncolored"
            );
            FieldColors::transparent()
        } else {
            classify_record(record, schedule, &policies.for_record(record))
        };

        let values = record_values(record, hours, employee_missing);
        let day_values = result.values.entry(key.clone()).or_default();
        if let Some(replaced) = day_values.insert(record.employee_id, values) {
            warn!(
                employee_id = record.employee_id,
                date = %key,
                replaced_record_id = replaced.id,
                record_id = record.id,
                "Multiple time records for employee and date, keeping latest"
            );
        }
        result
            .colors
            .entry(key)
            .or_default()
            .insert(record.employee_id, colors);
    }

    result
}
