use serde::Serialize;
use crate::errors::ThreatError;
use crate::models::{TestCaseNode, ThreatListing, ThreatTree, VulnerabilityNode};
use super::Database;

/// Row counts across the three levels of the hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub threats: i64,
    pub vulnerabilities: i64,
    pub test_cases: i64,
}

impl Database {
    pub fn list_threats(&self, limit: usize, offset: usize) -> Result<Vec<ThreatListing>, ThreatError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT t.id, t.title, t.description, t.created_at, \
             (SELECT COUNT(*) FROM vulnerabilities v WHERE v.threat_id = t.id) \
             FROM threats t ORDER BY t.created_at DESC, t.rowid DESC LIMIT ?1 OFFSET ?2"
        ).map_err(|e| ThreatError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64, offset as i64], |row: &rusqlite::Row| {
            Ok(ThreatListing {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                created_at: row.get(3)?,
                vulnerability_count: row.get(4)?,
            })
        }).map_err(|e| ThreatError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| ThreatError::Database(format!("Row error: {}", e)))?);
        }
        Ok(results)
    }

    /// Load a threat with its vulnerabilities and test cases in generation order.
    pub fn get_threat_tree(&self, id: &str) -> Result<Option<ThreatTree>, ThreatError> {
        let conn = self.lock()?;

        let threat = conn.query_row(
            "SELECT id, title, description, created_at FROM threats WHERE id = ?1",
            rusqlite::params![id],
            |row: &rusqlite::Row| {
                Ok(ThreatTree {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    created_at: row.get(3)?,
                    vulnerabilities: Vec::new(),
                })
            },
        );
        let mut threat = match threat {
            Ok(t) => t,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(ThreatError::Database(format!("Query error: {}", e))),
        };

        let mut vuln_stmt = conn.prepare(
            "SELECT id, description FROM vulnerabilities WHERE threat_id = ?1 ORDER BY position, rowid"
        ).map_err(|e| ThreatError::Database(format!("Query failed: {}", e)))?;
        let mut tc_stmt = conn.prepare(
            "SELECT id, description FROM test_cases WHERE vulnerability_id = ?1 ORDER BY position, rowid"
        ).map_err(|e| ThreatError::Database(format!("Query failed: {}", e)))?;

        let vulns = vuln_stmt.query_map(rusqlite::params![id], |row: &rusqlite::Row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        }).map_err(|e| ThreatError::Database(format!("Query error: {}", e)))?;

        for vuln in vulns {
            let (vuln_id, description) = vuln.map_err(|e| ThreatError::Database(format!("Row error: {}", e)))?;

            let cases = tc_stmt.query_map(rusqlite::params![vuln_id], |row: &rusqlite::Row| {
                Ok(TestCaseNode { id: row.get(0)?, description: row.get(1)? })
            }).map_err(|e| ThreatError::Database(format!("Query error: {}", e)))?;

            let mut test_cases = Vec::new();
            for tc in cases {
                test_cases.push(tc.map_err(|e| ThreatError::Database(format!("Row error: {}", e)))?);
            }

            threat.vulnerabilities.push(VulnerabilityNode { id: vuln_id, description, test_cases });
        }

        Ok(Some(threat))
    }

    /// Delete a threat and everything it owns, walking the hierarchy top-down.
    /// Returns false when no such threat exists.
    pub fn delete_threat(&self, id: &str) -> Result<bool, ThreatError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()
            .map_err(|e| ThreatError::Database(format!("Failed to begin transaction: {}", e)))?;

        tx.execute(
            "DELETE FROM test_cases WHERE vulnerability_id IN (SELECT id FROM vulnerabilities WHERE threat_id = ?1)",
            rusqlite::params![id],
        ).map_err(|e| ThreatError::Database(format!("Delete failed: {}", e)))?;
        tx.execute("DELETE FROM vulnerabilities WHERE threat_id = ?1", rusqlite::params![id])
            .map_err(|e| ThreatError::Database(format!("Delete failed: {}", e)))?;
        let affected = tx.execute("DELETE FROM threats WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| ThreatError::Database(format!("Delete failed: {}", e)))?;

        tx.commit()
            .map_err(|e| ThreatError::Database(format!("Failed to commit delete: {}", e)))?;
        Ok(affected > 0)
    }

    pub fn entity_counts(&self) -> Result<EntityCounts, ThreatError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT (SELECT COUNT(*) FROM threats), (SELECT COUNT(*) FROM vulnerabilities), (SELECT COUNT(*) FROM test_cases)",
            [],
            |row: &rusqlite::Row| {
                Ok(EntityCounts {
                    threats: row.get(0)?,
                    vulnerabilities: row.get(1)?,
                    test_cases: row.get(2)?,
                })
            },
        ).map_err(|e| ThreatError::Database(format!("Query error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TestCase, Threat, Vulnerability};

    fn seed(db: &Database, title: &str, vulns: &[(&str, &[&str])]) -> String {
        let mut uow = db.begin();
        let threat = Threat::new(title, "seeded threat");
        let threat_id = threat.id.clone();
        uow.add_threat(threat.clone()).unwrap();
        for (i, (desc, cases)) in vulns.iter().enumerate() {
            let vuln = Vulnerability::new(&threat, desc, i as u32 + 1);
            for (j, case) in cases.iter().enumerate() {
                uow.add_test_case(TestCase::new(&vuln, case, j as u32 + 1)).unwrap();
            }
            uow.add_vulnerability(vuln).unwrap();
        }
        uow.commit().unwrap();
        threat_id
    }

    #[test]
    fn test_db_get_threat_tree_preserves_order() {
        let db = Database::in_memory().unwrap();
        let id = seed(&db, "SQL injection", &[
            ("Unsanitised login form", &["TC1.1: ' OR 1=1 --", "TC1.2: UNION SELECT"]),
            ("Verbose SQL errors", &["TC2.1: Trigger syntax error"]),
        ]);

        let tree = db.get_threat_tree(&id).unwrap().unwrap();
        assert_eq!(tree.title, "SQL injection");
        assert_eq!(tree.vulnerabilities.len(), 2);
        assert_eq!(tree.vulnerabilities[0].description, "Unsanitised login form");
        assert_eq!(tree.vulnerabilities[0].test_cases[0].description, "TC1.1: ' OR 1=1 --");
        assert_eq!(tree.vulnerabilities[0].test_cases[1].description, "TC1.2: UNION SELECT");
        assert_eq!(tree.vulnerabilities[1].test_cases.len(), 1);
    }

    #[test]
    fn test_db_get_nonexistent_threat() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_threat_tree("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_db_delete_threat_cascades() {
        let db = Database::in_memory().unwrap();
        let doomed = seed(&db, "XSS", &[("Reflected search", &["TC1.1", "TC1.2"]), ("Stored comments", &["TC2.1"])]);
        let kept = seed(&db, "CSRF", &[("No token on transfer", &["TC1.1"])]);

        assert!(db.delete_threat(&doomed).unwrap());

        let counts = db.entity_counts().unwrap();
        assert_eq!(counts, EntityCounts { threats: 1, vulnerabilities: 1, test_cases: 1 });
        assert!(db.get_threat_tree(&kept).unwrap().is_some());
    }

    #[test]
    fn test_db_schema_cascade_without_explicit_walk() {
        let db = Database::in_memory().unwrap();
        let id = seed(&db, "DoS", &[("Unbounded upload size", &["TC1.1"])]);
        {
            let conn = db.lock().unwrap();
            conn.execute("DELETE FROM threats WHERE id = ?1", rusqlite::params![id]).unwrap();
        }
        assert_eq!(db.entity_counts().unwrap(), EntityCounts::default());
    }

    #[test]
    fn test_db_delete_nonexistent() {
        let db = Database::in_memory().unwrap();
        assert!(!db.delete_threat("no-such-threat").unwrap());
    }

    #[test]
    fn test_db_list_threats_pagination() {
        let db = Database::in_memory().unwrap();
        for i in 0..5 {
            seed(&db, &format!("Threat {}", i), &[("vuln", &[])]);
        }

        assert_eq!(db.list_threats(10, 0).unwrap().len(), 5);
        assert_eq!(db.list_threats(2, 0).unwrap().len(), 2);
        assert_eq!(db.list_threats(2, 2).unwrap().len(), 2);
        assert_eq!(db.list_threats(10, 4).unwrap().len(), 1);
    }

    #[test]
    fn test_db_list_threats_counts_vulnerabilities() {
        let db = Database::in_memory().unwrap();
        seed(&db, "Replay", &[("No nonce", &[]), ("Long-lived tokens", &[])]);
        let listing = db.list_threats(10, 0).unwrap();
        assert_eq!(listing[0].vulnerability_count, 2);
    }
}
