//! CSV loading, validation and export tests.

use rfm_core::{
    classifier::Tier,
    export::{class_statistics_csv, segmentation_csv},
    loader::read_transactions,
    pipeline::run_csv,
    RfmConfig, RfmError,
};

const ORDERS_CSV: &str = "\
date,customer_id,net_total,order_id
2024-06-19,vip,100.00,v1
2024-06-20,vip,100.00,v2
2024-06-21,vip,100.00,v3
2024-06-22,vip,100.00,v4
2024-06-23,vip,100.00,v5
2024-06-24,vip,100.00,v6
2024-06-25,vip,100.00,v7
2024-06-30,anchor,20.00,a1
2023-10-24,lapsed,30.00,l1
";

#[test]
fn csv_log_runs_end_to_end() {
    let output = run_csv(ORDERS_CSV.as_bytes(), &RfmConfig::default_test()).unwrap();

    assert_eq!(output.segmentation.len(), 3);
    let vip = output.segmentation.iter().find(|c| c.customer_id == "vip").unwrap();
    assert_eq!(vip.rfm_level, Tier::Vips);
}

#[test]
fn missing_column_is_reported() {
    let csv = "date,customer_id,order_id\n2024-01-01,c1,o1\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(
        matches!(&err, RfmError::MissingColumn { column } if column == "net_total"),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_date_column_is_reported() {
    let csv = "customer_id,net_total,order_id\nc1,10,o1\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(matches!(&err, RfmError::MissingColumn { column } if column == "date"));
}

#[test]
fn non_numeric_net_total_is_a_validation_failure() {
    let csv = "date,customer_id,net_total,order_id\n2024-01-01,c1,10,o1\n2024-01-02,c1,ten,o2\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(
        matches!(&err, RfmError::InvalidNetTotal { row: 3, value } if value == "ten"),
        "unexpected error: {err}"
    );
}

#[test]
fn nan_net_total_is_rejected() {
    let csv = "date,customer_id,net_total,order_id\n2024-01-01,c1,NaN,o1\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, RfmError::InvalidNetTotal { row: 2, .. }));
}

#[test]
fn unparseable_date_is_reported() {
    let csv = "date,customer_id,net_total,order_id\nyesterday,c1,10,o1\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(matches!(&err, RfmError::InvalidDate { row: 2, value } if value == "yesterday"));
}

#[test]
fn empty_customer_id_is_reported() {
    let csv = "date,customer_id,net_total,order_id\n2024-01-01, ,10,o1\n";
    let err = read_transactions(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, RfmError::EmptyField { row: 2, .. }));
}

#[test]
fn validation_failure_yields_no_result() {
    let csv = "date,customer_id,net_total,order_id\n2024-01-01,c1,10,o1\n2024-13-01,c2,10,o2\n";
    assert!(run_csv(csv.as_bytes(), &RfmConfig::default_test()).is_err());
}

#[test]
fn exported_tables_have_stable_headers() {
    let output = run_csv(ORDERS_CSV.as_bytes(), &RfmConfig::default_test()).unwrap();

    let classes = class_statistics_csv(&output.class_statistics).unwrap();
    assert_eq!(
        classes.lines().next(),
        Some("RFMClass,total_monetary,percent_of_total,total_customers,percentual_customers,mean_recency,mean_frequency")
    );

    let segments = segmentation_csv(&output.segmentation).unwrap();
    assert_eq!(
        segments.lines().next(),
        Some("customer_id,recency_days,frequency,monetary_value,R_Quartile,F_Quartile,M_Quartile,RFMClass,RFM_Score,RFM_Level,Customer_moment")
    );
    assert!(segments.contains(",444,12,Vips,Entrantes"), "vip row missing:\n{segments}");
    assert!(segments.contains("lapsed,250,1,30.0,0,1,1,011,2,Valiosos,Inativo"), "lapsed row:\n{segments}");
}
