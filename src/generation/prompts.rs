/// Prompt asking for plain bulleted vulnerabilities of one threat.
pub fn vulnerability_prompt(title: &str, description: &str) -> String {
    format!(
        "Title:\n{title}\n\n\
         Description:\n{description}\n\n\
         List all possible vulnerabilities related to this threat using plain bullet points, \
         no numbers, and short clear descriptions."
    )
}

/// Prompt asking for test cases labeled `✅ TC{index}.x` for one vulnerability.
/// `index` is the vulnerability's 1-based position within its threat.
pub fn test_case_prompt(vulnerability: &str, index: usize) -> String {
    format!(
        "Vulnerability:\n{vulnerability}\n\n\
         Generate as many well-labeled cybersecurity test cases as possible for this vulnerability.\n\
         Use ✅ TC{index}.x format for each line.\n\
         Example:\n\
         ✅ TC{index}.1: Attempt a SQL injection...\n\
         ✅ TC{index}.2: Exceed login attempts...\n"
    )
}
