use rusqlite::Transaction;
use crate::errors::ThreatError;
use crate::models::{TestCase, Threat, Vulnerability};
use super::Database;
use tracing::{debug, info, warn};

/// Lifecycle of a [`UnitOfWork`]. `Committed` and `RolledBack` are mutually
/// exclusive; every unit of work ends in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOfWorkState {
    Opened,
    Committed,
    RolledBack,
    Closed,
}

/// Number of rows written by a successful commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub threats: usize,
    pub vulnerabilities: usize,
    pub test_cases: usize,
}

/// Groups every entity created while handling one upload so they become
/// durable together or not at all.
///
/// Registration only buffers entities; the connection is not touched until
/// [`UnitOfWork::commit`], so no lock is held while the model is generating.
/// Dropping an open unit of work discards everything registered in it.
pub struct UnitOfWork {
    db: Database,
    threats: Vec<Threat>,
    vulnerabilities: Vec<Vulnerability>,
    test_cases: Vec<TestCase>,
    state: UnitOfWorkState,
}

impl Database {
    /// Open a new unit of work against this store.
    pub fn begin(&self) -> UnitOfWork {
        UnitOfWork {
            db: self.clone(),
            threats: Vec::new(),
            vulnerabilities: Vec::new(),
            test_cases: Vec::new(),
            state: UnitOfWorkState::Opened,
        }
    }
}

impl UnitOfWork {
    pub fn state(&self) -> UnitOfWorkState {
        self.state
    }

    /// Total number of entities waiting for commit.
    pub fn pending(&self) -> usize {
        self.threats.len() + self.vulnerabilities.len() + self.test_cases.len()
    }

    pub fn add_threat(&mut self, threat: Threat) -> Result<(), ThreatError> {
        self.ensure_open()?;
        self.threats.push(threat);
        Ok(())
    }

    pub fn add_vulnerability(&mut self, vulnerability: Vulnerability) -> Result<(), ThreatError> {
        self.ensure_open()?;
        self.vulnerabilities.push(vulnerability);
        Ok(())
    }

    pub fn add_test_case(&mut self, test_case: TestCase) -> Result<(), ThreatError> {
        self.ensure_open()?;
        self.test_cases.push(test_case);
        Ok(())
    }

    /// Write every registered entity in a single transaction.
    ///
    /// On failure the transaction is rolled back, the buffered entities are
    /// discarded and the unit of work moves to `RolledBack`.
    pub fn commit(&mut self) -> Result<CommitStats, ThreatError> {
        self.ensure_open()?;

        let result = self.write_all();
        match result {
            Ok(stats) => {
                self.state = UnitOfWorkState::Committed;
                self.clear();
                info!(
                    threats = stats.threats,
                    vulnerabilities = stats.vulnerabilities,
                    test_cases = stats.test_cases,
                    "Unit of work committed"
                );
                Ok(stats)
            }
            Err(e) => {
                warn!(error = %e, pending = self.pending(), "Commit failed, rolling back unit of work");
                self.state = UnitOfWorkState::RolledBack;
                self.clear();
                Err(e)
            }
        }
    }

    /// Discard everything registered so far. The store is left unchanged.
    pub fn rollback(&mut self) {
        if self.state == UnitOfWorkState::Opened {
            debug!(pending = self.pending(), "Rolling back unit of work");
            self.state = UnitOfWorkState::RolledBack;
            self.clear();
        }
    }

    /// Release the unit of work. Equivalent to dropping it.
    pub fn close(self) {}

    fn ensure_open(&self) -> Result<(), ThreatError> {
        match self.state {
            UnitOfWorkState::Opened => Ok(()),
            other => Err(ThreatError::Internal(format!(
                "Unit of work is no longer open (state: {:?})",
                other
            ))),
        }
    }

    fn clear(&mut self) {
        self.threats.clear();
        self.vulnerabilities.clear();
        self.test_cases.clear();
    }

    fn write_all(&self) -> Result<CommitStats, ThreatError> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()
            .map_err(|e| ThreatError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Dropping `tx` on the error path rolls the transaction back.
        insert_entities(&tx, &self.threats, &self.vulnerabilities, &self.test_cases)
            .map_err(|e| ThreatError::Database(format!("Failed to insert entities: {}", e)))?;

        tx.commit()
            .map_err(|e| ThreatError::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(CommitStats {
            threats: self.threats.len(),
            vulnerabilities: self.vulnerabilities.len(),
            test_cases: self.test_cases.len(),
        })
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if self.state == UnitOfWorkState::Opened && self.pending() > 0 {
            debug!(pending = self.pending(), "Unit of work dropped without commit, discarding");
        }
        self.rollback();
        self.state = UnitOfWorkState::Closed;
    }
}

/// Parents are written before children so foreign keys resolve.
fn insert_entities(
    tx: &Transaction<'_>,
    threats: &[Threat],
    vulnerabilities: &[Vulnerability],
    test_cases: &[TestCase],
) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO threats (id, title, description, created_at) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for t in threats {
        stmt.execute(rusqlite::params![t.id, t.title, t.description, t.created_at])?;
    }

    let mut stmt = tx.prepare_cached(
        "INSERT INTO vulnerabilities (id, threat_id, description, position) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for v in vulnerabilities {
        stmt.execute(rusqlite::params![v.id, v.threat_id, v.description, v.position])?;
    }

    let mut stmt = tx.prepare_cached(
        "INSERT INTO test_cases (id, vulnerability_id, description, position) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for tc in test_cases {
        stmt.execute(rusqlite::params![tc.id, tc.vulnerability_id, tc.description, tc.position])?;
    }

    Ok(())
}
