//! Tier and lifecycle-moment labeling tests.

use rfm_core::{
    classifier::{classify_tier, customer_moment, CustomerMoment, Tier},
    clusters::TierBands,
    config::MomentCutoffs,
    scoring::RfmClass,
};

fn bands() -> TierBands {
    TierBands {
        top_ranked:        Some(RfmClass::from("311")),
        valiosos:          vec!["444".into(), "433".into()],
        potenciais:        vec!["322".into()],
        descompromissados: vec!["111".into(), "011".into()],
    }
}

#[test]
fn tier_priority_order() {
    let bands = bands();
    assert_eq!(classify_tier(&RfmClass::top(), &bands), Tier::Vips, "444 beats band membership");
    assert_eq!(classify_tier(&"433".into(), &bands), Tier::Valiosos);
    assert_eq!(classify_tier(&"322".into(), &bands), Tier::Potenciais);
    assert_eq!(classify_tier(&"011".into(), &bands), Tier::Descompromissados);
}

#[test]
fn unbanded_class_is_unclassified() {
    let bands = bands();
    assert_eq!(classify_tier(&"311".into(), &bands), Tier::Unclassified);
    assert_eq!(classify_tier(&"000".into(), &TierBands::default()), Tier::Unclassified);
}

#[test]
fn vip_without_any_bands() {
    assert_eq!(classify_tier(&RfmClass::top(), &TierBands::default()), Tier::Vips);
}

#[test]
fn inactive_regardless_of_scores() {
    let cutoffs = MomentCutoffs::default();
    assert_eq!(customer_moment(250, &cutoffs), CustomerMoment::Inativo);
}

#[test]
fn custom_cutoffs() {
    let cutoffs = MomentCutoffs {
        entrantes_max:   7,
        manutencao_max:  60,
        recuperacao_max: 365,
    };
    assert_eq!(customer_moment(7, &cutoffs), CustomerMoment::Entrantes);
    assert_eq!(customer_moment(8, &cutoffs), CustomerMoment::Manutencao);
    assert_eq!(customer_moment(250, &cutoffs), CustomerMoment::Recuperacao);
    assert_eq!(customer_moment(366, &cutoffs), CustomerMoment::Inativo);
}

#[test]
fn tier_labels() {
    let labels: Vec<&str> = Tier::ALL.iter().map(Tier::label).collect();
    assert_eq!(
        labels,
        vec!["Vips", "Valiosos", "Potenciais", "Descompromissados", "Unclassified"]
    );
}
