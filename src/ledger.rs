use crate::datestamp::DateStamp;
use crate::errors::LedgerError;
use crate::number::{format_entry, format_signed};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionCode {
    /// Structural placeholder. Never rendered.
    None,

    /// The register was zeroed. The entry's number is the negation of the
    /// value that was cleared, so undoing it restores that value.
    RegisterCleared,

    LogCleared,
    AllCleared,
    Wrote,
    Loaded,

    /// A positive amount was applied to the total.
    Added,

    /// A negative amount was applied to the total. The sign is carried by
    /// the entry's number.
    Subtracted,

    Undone,
}

/// The arithmetic applied when a pending value is committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Apply the value with the sign it was entered with.
    #[default]
    Add,

    /// Apply the magnitude of the value as a subtraction.
    Subtract,
}

/// One recorded operation in the history.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    number: f64,
    running_total: f64,
    timestamp: String,
    code: ActionCode,
}

impl Action {
    /// The signed amount applied by this operation.
    pub fn number(&self) -> f64 {
        self.number
    }

    /// The total immediately after this operation.
    pub fn running_total(&self) -> f64 {
        self.running_total
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn code(&self) -> ActionCode {
        self.code
    }

    fn render<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        let ts = &self.timestamp;
        match self.code {
            ActionCode::None => return Ok(()),
            ActionCode::Added => writeln!(sink, "{}\t{}", ts, format_signed(self.number))?,
            ActionCode::Subtracted => writeln!(sink, "{}\t{}", ts, format_entry(self.number))?,
            ActionCode::Undone => {
                writeln!(sink, "{}\tUNDO", ts)?;
                writeln!(sink, "{}\t{}", ts, format_signed(self.number))?;
            }
            ActionCode::RegisterCleared => {
                writeln!(sink, "{}\tREGISTER CLEARED", ts)?;
                writeln!(sink, "{}\t{}", ts, format_signed(self.number))?;
            }
            other => writeln!(sink, "{}\tUNRECOGNIZED ENTRY ({:?})", ts, other)?,
        }
        write!(
            sink,
            "{}\tTotal:  {}\n\n",
            ts,
            format_entry(self.running_total)
        )
    }
}

/// A Ledger holds the running total and the history of operations that
/// produced it.
///
/// The history always starts with a sentinel entry that anchors the undo
/// boundary. The last element of the history is the current position: new
/// operations are pushed after it and undo pops it, so an undone operation
/// can never be redone.
#[derive(Clone, Debug)]
pub struct Ledger {
    history: Vec<Action>,
    total: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        let sentinel = Action {
            number: 0.0,
            running_total: 0.0,
            timestamp: DateStamp::now().human(),
            code: ActionCode::None,
        };

        Self {
            history: vec![sentinel],
            total: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// The number of the current tail entry, or 0 at the sentinel.
    pub fn last_number(&self) -> f64 {
        self.tail().number
    }

    pub fn last_code(&self) -> ActionCode {
        self.tail().code
    }

    /// The number of recorded operations, excluding the sentinel.
    pub fn len(&self) -> usize {
        self.history.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the renderable entries in the order they were recorded.
    pub fn entries(&self) -> impl Iterator<Item = &Action> {
        self.history
            .iter()
            .filter(|action| action.code != ActionCode::None)
    }

    /// Record `amount` under `code`, stamped with the current time.
    pub fn append(&mut self, amount: f64, code: ActionCode) -> Result<&Action, LedgerError> {
        self.append_stamped(amount, code, DateStamp::now())
    }

    /// Record `amount` under `code` with an explicit timestamp.
    pub fn append_stamped(
        &mut self,
        amount: f64,
        code: ActionCode,
        stamp: DateStamp,
    ) -> Result<&Action, LedgerError> {
        // Reserve before touching the total so a failed allocation leaves the
        // ledger exactly as it was.
        self.history
            .try_reserve(1)
            .map_err(|_| LedgerError::OutOfMemory {
                context: "function:  Ledger::append",
            })?;

        self.total += amount;
        self.history.push(Action {
            number: amount,
            running_total: self.total,
            timestamp: stamp.human(),
            code,
        });

        Ok(self.tail())
    }

    /// Apply a pending value under `mode`.
    ///
    /// Positive amounts are recorded as `Added` and negative amounts as
    /// `Subtracted`. A zero or non-finite amount records nothing and returns
    /// `None`.
    pub fn commit(&mut self, value: f64, mode: Mode) -> Result<Option<&Action>, LedgerError> {
        let amount = match mode {
            Mode::Add => value,
            Mode::Subtract => -value.abs(),
        };

        let code = if !amount.is_finite() {
            return Ok(None);
        } else if amount > 0.0 {
            ActionCode::Added
        } else if amount < 0.0 {
            ActionCode::Subtracted
        } else {
            return Ok(None);
        };

        self.append(amount, code).map(Some)
    }

    /// Roll back the current tail entry and return it.
    ///
    /// Returns `None` and leaves the ledger untouched when the tail is the
    /// sentinel.
    pub fn undo(&mut self) -> Option<Action> {
        if self.history.len() == 1 {
            return None;
        }

        let undone = self.history.pop()?;
        self.total = self.tail().running_total;

        log::debug!(
            "undid {:?} of {}, total now {}",
            undone.code,
            undone.number,
            self.total
        );
        Some(undone)
    }

    /// Zero the register, recording the negation of the cleared value.
    ///
    /// Returns the value callers should treat as pending, which is always 0.
    pub fn clear_register(&mut self) -> Result<f64, LedgerError> {
        let cleared = if self.total == 0.0 { 0.0 } else { -self.total };

        self.append(cleared, ActionCode::RegisterCleared)?;
        self.total = 0.0;
        if let Some(tail) = self.history.last_mut() {
            tail.running_total = 0.0;
        }

        Ok(0.0)
    }

    /// Write one block per recorded entry, oldest first.
    pub fn render<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for action in self.entries() {
            action.render(sink)?;
        }

        Ok(())
    }

    fn tail(&self) -> &Action {
        // The sentinel is never popped, so the history is never empty.
        &self.history[self.history.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> DateStamp {
        NaiveDate::from_ymd_opt(2021, 4, 3)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .map(DateStamp::from)
            .unwrap()
    }

    fn rendered(ledger: &Ledger) -> String {
        let mut buf = Vec::new();
        ledger.render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn should_start_with_only_the_sentinel() {
        let ledger = Ledger::new();

        assert_eq!(ledger.total(), 0.0);
        assert_eq!(ledger.last_number(), 0.0);
        assert_eq!(ledger.last_code(), ActionCode::None);
        assert!(ledger.is_empty());
        assert_eq!(ledger.entries().count(), 0);
    }

    #[test]
    fn should_sum_appended_amounts() {
        let mut ledger = Ledger::new();
        let amounts = [5.0, -3.0, 12.5, -0.25, 100.0];

        for amount in amounts {
            ledger.commit(amount, Mode::Add).unwrap();
        }

        assert_eq!(ledger.total(), amounts.iter().sum::<f64>());
        assert_eq!(ledger.len(), amounts.len());

        // Every running total agrees with the sum up to that point.
        let mut running = 0.0;
        for (action, amount) in ledger.entries().zip(amounts) {
            running += amount;
            assert_eq!(action.running_total(), running);
        }
    }

    #[test]
    fn should_record_codes_by_sign_of_applied_amount() {
        let mut ledger = Ledger::new();

        ledger.commit(4.0, Mode::Add).unwrap();
        assert_eq!(ledger.last_code(), ActionCode::Added);

        // Subtract mode flips a positive entry and leaves a negative one alone.
        ledger.commit(3.0, Mode::Subtract).unwrap();
        assert_eq!(ledger.last_code(), ActionCode::Subtracted);
        assert_eq!(ledger.last_number(), -3.0);

        ledger.commit(-3.0, Mode::Subtract).unwrap();
        assert_eq!(ledger.last_number(), -3.0);
        assert_eq!(ledger.total(), -2.0);
    }

    #[test]
    fn should_ignore_zero_commits() {
        let mut ledger = Ledger::new();

        assert_eq!(ledger.commit(0.0, Mode::Add).unwrap(), None);
        assert_eq!(ledger.commit(0.0, Mode::Subtract).unwrap(), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn should_ignore_non_finite_commits() {
        let mut ledger = Ledger::new();
        ledger.commit(1e300, Mode::Add).unwrap();

        assert_eq!(ledger.commit(f64::INFINITY, Mode::Add).unwrap(), None);
        assert_eq!(ledger.commit(f64::NAN, Mode::Subtract).unwrap(), None);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), 1e300);
    }

    #[test]
    fn should_restore_total_on_undo() {
        let mut ledger = Ledger::new();
        ledger.commit(10.0, Mode::Add).unwrap();

        for x in [0.1, -7.0, 1e300, 3.3333] {
            let before = ledger.total();
            ledger.commit(x, Mode::Add).unwrap();
            let undone = ledger.undo().unwrap();

            assert_eq!(undone.number(), x);
            assert_eq!(ledger.total(), before);
            assert_eq!(ledger.len(), 1);
        }
    }

    #[test]
    fn should_stop_undo_at_the_sentinel() {
        let mut ledger = Ledger::new();
        ledger.commit(2.0, Mode::Add).unwrap();

        assert!(ledger.undo().is_some());
        assert!(ledger.undo().is_none());
        assert!(ledger.undo().is_none());

        assert_eq!(ledger.total(), 0.0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.last_code(), ActionCode::None);
    }

    #[test]
    fn should_not_redo_after_new_entry() {
        let mut ledger = Ledger::new();
        ledger.commit(1.0, Mode::Add).unwrap();
        ledger.commit(2.0, Mode::Add).unwrap();
        ledger.undo();
        ledger.commit(5.0, Mode::Add).unwrap();

        let numbers: Vec<f64> = ledger.entries().map(Action::number).collect();
        assert_eq!(numbers, vec![1.0, 5.0]);
        assert_eq!(ledger.total(), 6.0);
    }

    #[test]
    fn should_clear_register_reversibly() {
        let mut ledger = Ledger::new();
        ledger.commit(7.5, Mode::Add).unwrap();

        assert_eq!(ledger.clear_register().unwrap(), 0.0);
        assert_eq!(ledger.total(), 0.0);
        assert_eq!(ledger.last_code(), ActionCode::RegisterCleared);
        assert_eq!(ledger.last_number(), -7.5);

        ledger.undo();
        assert_eq!(ledger.total(), 7.5);
    }

    #[test]
    fn should_clear_an_empty_register_without_negative_zero() {
        let mut ledger = Ledger::new();
        ledger.clear_register().unwrap();

        assert_eq!(ledger.last_number(), 0.0);
        assert!(ledger.last_number().is_sign_positive());
    }

    #[test]
    fn should_render_history_blocks() {
        let mut ledger = Ledger::new();
        ledger
            .append_stamped(5.0, ActionCode::Added, stamp())
            .unwrap();
        ledger
            .append_stamped(-3.0, ActionCode::Subtracted, stamp())
            .unwrap();
        ledger
            .append_stamped(-2.0, ActionCode::RegisterCleared, stamp())
            .unwrap();
        ledger.append_stamped(4.0, ActionCode::Undone, stamp()).unwrap();
        ledger.append_stamped(0.0, ActionCode::Wrote, stamp()).unwrap();

        let expected = "\
2021-04-03  12:30:00\t+5
2021-04-03  12:30:00\tTotal:  5

2021-04-03  12:30:00\t-3
2021-04-03  12:30:00\tTotal:  2

2021-04-03  12:30:00\tREGISTER CLEARED
2021-04-03  12:30:00\t-2
2021-04-03  12:30:00\tTotal:  0

2021-04-03  12:30:00\tUNDO
2021-04-03  12:30:00\t+4
2021-04-03  12:30:00\tTotal:  4

2021-04-03  12:30:00\tUNRECOGNIZED ENTRY (Wrote)
2021-04-03  12:30:00\tTotal:  4

";
        assert_eq!(rendered(&ledger), expected);
    }

    #[test]
    fn should_render_nothing_for_empty_history() {
        assert_eq!(rendered(&Ledger::new()), "");
    }
}
