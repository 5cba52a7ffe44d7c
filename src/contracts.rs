use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DashError, DashResult};
use crate::store::{DocumentStore, Filter, to_document_data};
use crate::user_profile::Role;

pub const OFFERS_COLLECTION: &str = "offers";

const MAX_DURATION_YEARS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Countered,
    Accepted,
    Rejected,
    Withdrawn,
}

impl OfferStatus {
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            OfferStatus::Accepted | OfferStatus::Rejected | OfferStatus::Withdrawn
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            OfferStatus::Pending => "PENDING",
            OfferStatus::Countered => "COUNTERED",
            OfferStatus::Accepted => "ACCEPTED",
            OfferStatus::Rejected => "REJECTED",
            OfferStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Athlete,
    Recruiter,
}

impl Party {
    pub fn for_role(role: Role) -> Party {
        match role {
            Role::Athlete => Party::Athlete,
            Role::Recruiter => Party::Recruiter,
        }
    }

    /// Offer field holding this party's user id.
    fn field(self) -> &'static str {
        match self {
            Party::Athlete => "athlete",
            Party::Recruiter => "recruiter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub salary: u32,
    pub duration_years: u8,
    #[serde(default)]
    pub signing_bonus: u32,
    #[serde(default)]
    pub incentives: Vec<String>,
}

impl ContractTerms {
    pub fn total_value(&self) -> u64 {
        self.salary as u64 * self.duration_years as u64 + self.signing_bonus as u64
    }

    fn validate(&self) -> DashResult<()> {
        if self.salary == 0 {
            return Err(DashError::invalid("salary must be positive"));
        }
        if self.duration_years == 0 || self.duration_years > MAX_DURATION_YEARS {
            return Err(DashError::invalid(format!(
                "duration must be 1-{MAX_DURATION_YEARS} years"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferEvent {
    pub at: DateTime<Utc>,
    pub by: Party,
    pub status: OfferStatus,
    pub terms: ContractTerms,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractOffer {
    pub id: String,
    pub athlete: String,
    pub recruiter: String,
    pub terms: ContractTerms,
    pub status: OfferStatus,
    /// Party that made the proposal currently on the table.
    pub proposed_by: Party,
    #[serde(default)]
    pub history: Vec<OfferEvent>,
}

impl ContractOffer {
    pub fn new(
        athlete: impl Into<String>,
        recruiter: impl Into<String>,
        terms: ContractTerms,
    ) -> DashResult<Self> {
        terms.validate()?;
        let mut offer = Self {
            id: Uuid::new_v4().to_string(),
            athlete: athlete.into(),
            recruiter: recruiter.into(),
            terms,
            status: OfferStatus::Pending,
            proposed_by: Party::Recruiter,
            history: Vec::new(),
        };
        offer.record(Party::Recruiter);
        Ok(offer)
    }

    pub fn counter(&mut self, by: Party, terms: ContractTerms) -> DashResult<()> {
        self.ensure_open("counter")?;
        terms.validate()?;
        self.terms = terms;
        self.status = OfferStatus::Countered;
        self.proposed_by = by;
        self.record(by);
        Ok(())
    }

    /// Only the party receiving the current proposal can accept it.
    pub fn accept(&mut self, by: Party) -> DashResult<()> {
        self.ensure_open("accept")?;
        if by == self.proposed_by {
            return Err(DashError::InvalidTransition(
                "cannot accept your own proposal".to_string(),
            ));
        }
        self.status = OfferStatus::Accepted;
        self.record(by);
        Ok(())
    }

    pub fn reject(&mut self, by: Party) -> DashResult<()> {
        self.ensure_open("reject")?;
        if by == self.proposed_by {
            return Err(DashError::InvalidTransition(
                "cannot reject your own proposal; withdraw it instead".to_string(),
            ));
        }
        self.status = OfferStatus::Rejected;
        self.record(by);
        Ok(())
    }

    /// Only the party that made the current proposal can withdraw it.
    pub fn withdraw(&mut self, by: Party) -> DashResult<()> {
        self.ensure_open("withdraw")?;
        if by != self.proposed_by {
            return Err(DashError::InvalidTransition(
                "only the proposing party can withdraw".to_string(),
            ));
        }
        self.status = OfferStatus::Withdrawn;
        self.record(by);
        Ok(())
    }

    /// The other side of the deal, as seen by `party`.
    pub fn counterpart(&self, party: Party) -> &str {
        match party {
            Party::Athlete => &self.recruiter,
            Party::Recruiter => &self.athlete,
        }
    }

    fn ensure_open(&self, action: &str) -> DashResult<()> {
        if self.status.is_closed() {
            return Err(DashError::InvalidTransition(format!(
                "cannot {action} an offer that is {}",
                self.status.label().to_lowercase()
            )));
        }
        Ok(())
    }

    fn record(&mut self, by: Party) {
        self.history.push(OfferEvent {
            at: Utc::now(),
            by,
            status: self.status,
            terms: self.terms.clone(),
        });
    }
}

pub fn save_offer(store: &mut dyn DocumentStore, offer: &ContractOffer) -> DashResult<()> {
    store.set_document(OFFERS_COLLECTION, &offer.id, to_document_data(offer)?)
}

pub fn load_offers(store: &dyn DocumentStore, recruiter: &str) -> DashResult<Vec<ContractOffer>> {
    load_offers_for(store, Party::Recruiter, recruiter)
}

/// Offers where `uid` sits on the `party` side of the deal.
pub fn load_offers_for(
    store: &dyn DocumentStore,
    party: Party,
    uid: &str,
) -> DashResult<Vec<ContractOffer>> {
    store
        .query_documents(OFFERS_COLLECTION, &[Filter::eq(party.field(), uid)])?
        .iter()
        .map(|doc| doc.decode())
        .collect()
}

/// Demo offers with `uid` on the `party` side.
pub fn sample_offers_for(party: Party, uid: &str) -> Vec<ContractOffer> {
    match party {
        Party::Recruiter => sample_offers(uid),
        Party::Athlete => {
            let seeds = [
                ("Northside FC Academy", 70_000, 2, 8_000),
                ("Harbor City United", 95_000, 3, 15_000),
            ];
            seeds
                .into_iter()
                .filter_map(|(recruiter, salary, years, bonus)| {
                    ContractOffer::new(
                        uid,
                        recruiter,
                        ContractTerms {
                            salary,
                            duration_years: years,
                            signing_bonus: bonus,
                            incentives: Vec::new(),
                        },
                    )
                    .ok()
                })
                .collect()
        }
    }
}

pub fn sample_offers(recruiter: &str) -> Vec<ContractOffer> {
    let seeds = [
        ("Mateo Alvarez", 85_000, 3, 10_000, vec!["Goal bonus".to_string()]),
        ("Jordan Ellis", 120_000, 4, 25_000, vec!["Playoff bonus".to_string()]),
        ("Sofia Novak", 60_000, 2, 5_000, Vec::new()),
    ];
    seeds
        .into_iter()
        .filter_map(|(athlete, salary, years, bonus, incentives)| {
            ContractOffer::new(
                athlete,
                recruiter,
                ContractTerms {
                    salary,
                    duration_years: years,
                    signing_bonus: bonus,
                    incentives,
                },
            )
            .ok()
        })
        .collect()
}
