pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS threats (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vulnerabilities (
    id TEXT PRIMARY KEY,
    threat_id TEXT NOT NULL REFERENCES threats(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    position INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS test_cases (
    id TEXT PRIMARY KEY,
    vulnerability_id TEXT NOT NULL REFERENCES vulnerabilities(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    position INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_vulnerabilities_threat ON vulnerabilities(threat_id);
CREATE INDEX IF NOT EXISTS idx_test_cases_vulnerability ON test_cases(vulnerability_id);
CREATE INDEX IF NOT EXISTS idx_threats_created ON threats(created_at);
";
