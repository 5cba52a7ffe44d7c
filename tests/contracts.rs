use athlete_terminal::contracts::{
    ContractOffer, ContractTerms, OfferStatus, Party, load_offers, load_offers_for,
    sample_offers, sample_offers_for, save_offer,
};
use athlete_terminal::error::ErrorKind;
use athlete_terminal::store::MemoryStore;

fn terms(salary: u32) -> ContractTerms {
    ContractTerms {
        salary,
        duration_years: 3,
        signing_bonus: 10_000,
        incentives: vec!["Goal bonus".to_string()],
    }
}

fn offer() -> ContractOffer {
    ContractOffer::new("Mateo Alvarez", "rec-1", terms(80_000)).expect("valid offer")
}

#[test]
fn new_offer_is_pending_from_recruiter() {
    let offer = offer();
    assert_eq!(offer.status, OfferStatus::Pending);
    assert_eq!(offer.proposed_by, Party::Recruiter);
    assert_eq!(offer.history.len(), 1);
    assert_eq!(offer.terms.total_value(), 80_000 * 3 + 10_000);
}

#[test]
fn athlete_counter_then_recruiter_accepts() {
    let mut offer = offer();
    offer.counter(Party::Athlete, terms(95_000)).expect("counter");
    assert_eq!(offer.status, OfferStatus::Countered);
    assert_eq!(offer.proposed_by, Party::Athlete);

    let err = offer.accept(Party::Athlete).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    offer.accept(Party::Recruiter).expect("accept");
    assert_eq!(offer.status, OfferStatus::Accepted);
    assert_eq!(offer.terms.salary, 95_000);
    assert_eq!(offer.history.len(), 3);
}

#[test]
fn only_the_proposer_can_withdraw() {
    let mut offer = offer();
    let err = offer.withdraw(Party::Athlete).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    offer.withdraw(Party::Recruiter).expect("withdraw");
    assert_eq!(offer.status, OfferStatus::Withdrawn);
}

#[test]
fn closed_offers_reject_every_action() {
    let mut offer = offer();
    offer.reject(Party::Athlete).expect("reject");
    assert!(offer.status.is_closed());

    for result in [
        offer.clone().accept(Party::Athlete),
        offer.clone().reject(Party::Athlete),
        offer.clone().withdraw(Party::Recruiter),
        offer.clone().counter(Party::Athlete, terms(1)),
    ] {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidTransition);
    }
}

#[test]
fn invalid_terms_are_rejected() {
    let mut zero_salary = terms(0);
    assert_eq!(
        ContractOffer::new("A", "R", zero_salary.clone())
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidInput
    );
    zero_salary.salary = 1;
    zero_salary.duration_years = 11;
    assert!(ContractOffer::new("A", "R", zero_salary).is_err());

    let mut offer = offer();
    let mut bad = terms(90_000);
    bad.duration_years = 0;
    assert_eq!(
        offer.counter(Party::Athlete, bad).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(offer.status, OfferStatus::Pending);
}

#[test]
fn offers_persist_per_recruiter() {
    let mut store = MemoryStore::new();
    for offer in sample_offers("rec-1") {
        save_offer(&mut store, &offer).expect("save");
    }
    save_offer(&mut store, &ContractOffer::new("X", "rec-2", terms(50_000)).expect("offer"))
        .expect("save");

    let mut mine = load_offers(&store, "rec-1").expect("load");
    assert_eq!(mine.len(), 3);

    let first = &mut mine[0];
    first.counter(Party::Athlete, terms(99_000)).expect("counter");
    save_offer(&mut store, first).expect("update");

    let reloaded = load_offers(&store, "rec-1").expect("reload");
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded[0].status, OfferStatus::Countered);
    assert_eq!(reloaded[0].history.len(), 2);
    assert_eq!(load_offers(&store, "rec-2").expect("load").len(), 1);
}

#[test]
fn athlete_and_recruiter_see_the_same_offer_from_opposite_sides() {
    let mut store = MemoryStore::new();
    let offer = ContractOffer::new("kim", "rec-1", terms(70_000)).expect("offer");
    save_offer(&mut store, &offer).expect("save");
    save_offer(&mut store, &ContractOffer::new("lee", "rec-1", terms(60_000)).expect("offer"))
        .expect("save");

    let athlete_view = load_offers_for(&store, Party::Athlete, "kim").expect("athlete view");
    assert_eq!(athlete_view.len(), 1);
    assert_eq!(athlete_view[0].id, offer.id);
    assert_eq!(athlete_view[0].counterpart(Party::Athlete), "rec-1");

    let recruiter_view = load_offers_for(&store, Party::Recruiter, "rec-1").expect("recruiter view");
    assert_eq!(recruiter_view.len(), 2);
    let same = recruiter_view
        .iter()
        .find(|o| o.id == offer.id)
        .expect("offer visible to recruiter");
    assert_eq!(same.counterpart(Party::Recruiter), "kim");

    assert!(load_offers_for(&store, Party::Recruiter, "kim").expect("load").is_empty());

    let mut accepted = athlete_view[0].clone();
    accepted.accept(Party::Athlete).expect("athlete accepts recruiter proposal");
    save_offer(&mut store, &accepted).expect("update");
    let reloaded = load_offers_for(&store, Party::Recruiter, "rec-1").expect("reload");
    let same = reloaded.iter().find(|o| o.id == offer.id).expect("offer");
    assert_eq!(same.status, OfferStatus::Accepted);
}

#[test]
fn athlete_demo_offers_name_the_athlete() {
    let offers = sample_offers_for(Party::Athlete, "kim");
    assert!(!offers.is_empty());
    for offer in &offers {
        assert_eq!(offer.athlete, "kim");
        assert_ne!(offer.recruiter, "kim");
        assert_eq!(offer.proposed_by, Party::Recruiter);
    }

    let recruiter_side = sample_offers_for(Party::Recruiter, "rec-9");
    assert!(recruiter_side.iter().all(|o| o.recruiter == "rec-9"));
}
