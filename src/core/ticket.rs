//! Ticket intake - Validating the ticket form and naming ticket channels.
//!
//! The bot layer collects the form through a modal and creates the channel; this module
//! holds the platform-independent parts so they can be tested without Discord.

use crate::errors::{Error, Result};
use rand::Rng;
use std::ops::RangeInclusive;

/// Range of the random suffix appended to ticket channel names.
pub const SUFFIX_RANGE: RangeInclusive<u16> = 1000..=9999;

const FALLBACK_SLUG: &str = "ticket";

/// A submitted ticket form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    /// Team the ticket is for
    pub team_name: String,
    /// Problem description
    pub issue: String,
    /// Optional proof text
    pub proof: Option<String>,
}

impl TicketRequest {
    /// Builds a request from raw form values, trimming whitespace.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTicket`] if the team name or issue is blank.
    pub fn new(team_name: &str, issue: &str, proof: Option<&str>) -> Result<Self> {
        let team_name = team_name.trim();
        let issue = issue.trim();

        if team_name.is_empty() {
            return Err(Error::InvalidTicket {
                message: "team name is required".to_string(),
            });
        }
        if issue.is_empty() {
            return Err(Error::InvalidTicket {
                message: "issue is required".to_string(),
            });
        }

        Ok(Self {
            team_name: team_name.to_string(),
            issue: issue.to_string(),
            proof: proof
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        })
    }

    /// Body of the ticket embed.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "**Issue**: {}\n**Proof**: {}",
            self.issue,
            self.proof.as_deref().unwrap_or("No proof provided")
        )
    }
}

/// Channel name for a ticket: the slugged team name followed by `suffix`.
#[must_use]
pub fn channel_name(team_name: &str, suffix: u16) -> String {
    let slug = team_name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        format!("{FALLBACK_SLUG}-{suffix}")
    } else {
        format!("{slug}-{suffix}")
    }
}

/// Draws a random channel suffix.
pub fn random_suffix<R: Rng>(rng: &mut R) -> u16 {
    rng.gen_range(SUFFIX_RANGE)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_request_trims_and_drops_blank_proof() {
        let request = TicketRequest::new("  Night Owls ", " lag in match 3 ", Some("   ")).unwrap();
        assert_eq!(request.team_name, "Night Owls");
        assert_eq!(request.issue, "lag in match 3");
        assert!(request.proof.is_none());
    }

    #[test]
    fn test_request_requires_team_and_issue() {
        assert!(matches!(
            TicketRequest::new(" ", "issue", None),
            Err(Error::InvalidTicket { .. })
        ));
        assert!(matches!(
            TicketRequest::new("Team", "", None),
            Err(Error::InvalidTicket { .. })
        ));
    }

    #[test]
    fn test_description_mentions_missing_proof() {
        let request = TicketRequest::new("Team", "Score not recorded", None).unwrap();
        assert_eq!(
            request.description(),
            "**Issue**: Score not recorded\n**Proof**: No proof provided"
        );

        let with_proof = TicketRequest::new("Team", "Bug", Some("Sent screenshot")).unwrap();
        assert!(with_proof.description().ends_with("Sent screenshot"));
    }

    #[test]
    fn test_channel_name_slugs_team() {
        assert_eq!(channel_name("Night Owls", 4821), "night-owls-4821");
        assert_eq!(channel_name("Team #1!", 1000), "team-1-1000");
        assert_eq!(channel_name("!!!", 9999), "ticket-9999");
    }

    #[test]
    fn test_random_suffix_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(SUFFIX_RANGE.contains(&random_suffix(&mut rng)));
        }
    }
}
