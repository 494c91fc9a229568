//! Deterministic client name and email generation using curated lists.
//!
//! All generation is deterministic (same RNG stream = same names).

use crate::rng::DatasetRng;

/// A generated person: display name plus the parts used for the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedName {
    pub first: &'static str,
    pub last: &'static str,
}

impl GeneratedName {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// Deterministic name generator using curated name lists
pub struct NameGenerator;

impl NameGenerator {
    /// Draw a first + last name pair.
    pub fn generate_name(rng: &mut DatasetRng) -> GeneratedName {
        let first = *rng.pick(Self::first_names());
        let last = *rng.pick(Self::last_names());
        GeneratedName { first, last }
    }

    /// `first.last{1..=99}@domain`, lower-cased.
    pub fn generate_email(name: &GeneratedName, rng: &mut DatasetRng) -> String {
        let suffix = rng.int_inclusive(1, 99);
        let domain = rng.pick(Self::email_domains());
        format!(
            "{}.{}{}@{}",
            name.first.to_lowercase(),
            name.last.to_lowercase(),
            suffix,
            domain
        )
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Alexander", "Samantha", "Michael", "Jennifer", "Christopher", "Ashley",
            "Matthew", "Jessica", "Andrew", "Sarah", "Joshua", "Amanda", "Daniel",
            "Melissa", "David", "Nicole", "James", "Elizabeth", "Robert", "Stephanie",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson",
            "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee",
        ]
    }

    fn email_domains() -> &'static [&'static str] {
        &["gmail.com", "yahoo.com", "outlook.com", "hotmail.com", "aol.com"]
    }
}
