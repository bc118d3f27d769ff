use alloy_primitives::U256;

use fundctl::config::Config;
use fundctl::deployment::Deployment;
use fundctl::error::{ConfigError, Error};
use fundctl::domain::ExchangeId;
use fundctl::resolver::{resolve_exchanges, resolve_request, selected_ids};

fn registry() -> Deployment {
    Deployment::parse_json(
        r#"{
            "melon": {
                "addr": {
                    "Version": "0x0100000000000000000000000000000000000001",
                    "ManagementFee": "0x0100000000000000000000000000000000000002",
                    "PerformanceFee": "0x0100000000000000000000000000000000000003",
                    "OasisDexAdapter": "0x0100000000000000000000000000000000000004",
                    "KyberAdapter": "0x0100000000000000000000000000000000000005",
                    "ZeroExV2Adapter": "0x0100000000000000000000000000000000000006",
                    "Engine": "0x0100000000000000000000000000000000000007",
                    "EngineAdapter": "0x0100000000000000000000000000000000000008"
                }
            },
            "tokens": {
                "addr": {
                    "WETH": "0x0200000000000000000000000000000000000001",
                    "MLN": "0x0200000000000000000000000000000000000002",
                    "DAI": "0x0200000000000000000000000000000000000003"
                }
            },
            "oasis": { "addr": { "OasisDexExchange": "0x0300000000000000000000000000000000000001" } },
            "kyber": { "addr": { "KyberNetworkProxy": "0x0300000000000000000000000000000000000002" } },
            "zeroExV2": { "addr": { "ZeroExV2Exchange": "0x0300000000000000000000000000000000000003" } }
        }"#,
    )
    .expect("test registry should parse")
}

fn config_with_exchanges(exchanges: &[&str]) -> Config {
    let list = exchanges
        .iter()
        .map(|e| format!("\"{e}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let toml = format!(
        r#"
        [network]
        endpoint = "https://rinkeby.example.org"
        name = "rinkeby"
        deployment_file = "addresses.json"

        [fund]
        name = "Test Fund"
        quote_token = "WETH"
        allowed_tokens = ["WETH", "MLN"]
        management_fee = "0.02"
        performance_fee = "0.20"
        exchanges = [{list}]

        [wallet]
        sender = "0x1111111111111111111111111111111111111111"
        keystore_path = "keystore.json"
        "#
    );
    Config::parse_toml(&toml).expect("test config should parse")
}

#[test]
fn exchange_and_adapter_lists_are_always_parallel() {
    let deployment = registry();
    for selection in [
        vec![],
        vec!["OasisDex".to_string()],
        vec!["KyberNetwork".to_string(), "OasisDex".to_string()],
        vec!["Unknown".to_string(), "MelonEngine".to_string()],
    ] {
        let pairs = resolve_exchanges(&selection, &deployment).unwrap();
        assert_eq!(pairs.exchanges().len(), pairs.adapters().len());
    }
}

#[test]
fn resolution_order_is_invariant_under_input_permutation() {
    let deployment = registry();
    let forward = resolve_exchanges(
        &["OasisDex".into(), "KyberNetwork".into(), "ZeroExV2".into()],
        &deployment,
    )
    .unwrap();
    let shuffled = resolve_exchanges(
        &["ZeroExV2".into(), "OasisDex".into(), "KyberNetwork".into()],
        &deployment,
    )
    .unwrap();

    assert_eq!(forward.exchanges(), shuffled.exchanges());
    assert_eq!(forward.adapters(), shuffled.adapters());

    // Canonical order puts Oasis first regardless of the input order.
    assert_eq!(
        forward.exchanges()[0],
        deployment.oasis.get("OasisDexExchange").unwrap()
    );
    assert_eq!(
        forward.adapters()[0],
        deployment.melon.get("OasisDexAdapter").unwrap()
    );
}

#[test]
fn unknown_exchange_identifiers_are_silently_dropped() {
    let deployment = registry();
    let pairs = resolve_exchanges(
        &["OasisDex".into(), "KyberNetwork".into(), "Foo".into()],
        &deployment,
    )
    .unwrap();

    assert_eq!(pairs.len(), 2);
    assert_eq!(
        pairs.exchanges(),
        &[
            deployment.oasis.get("OasisDexExchange").unwrap(),
            deployment.kyber.get("KyberNetworkProxy").unwrap(),
        ]
    );
    assert_eq!(
        pairs.adapters(),
        &[
            deployment.melon.get("OasisDexAdapter").unwrap(),
            deployment.melon.get("KyberAdapter").unwrap(),
        ]
    );
}

#[test]
fn selected_ids_come_back_in_canonical_order() {
    let ids = selected_ids(&[
        "MelonEngine".into(),
        "Foo".into(),
        "OasisDex".into(),
        "ZeroExV2".into(),
    ]);
    assert_eq!(
        ids,
        vec![
            ExchangeId::OasisDex,
            ExchangeId::ZeroExV2,
            ExchangeId::MelonEngine,
        ]
    );
}

#[test]
fn empty_selection_resolves_to_a_fund_without_venues() {
    let deployment = registry();
    let pairs = resolve_exchanges(&[], &deployment).unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn known_exchange_with_missing_contracts_is_fatal() {
    let deployment = registry();
    // ZeroExV3 adapter and exchange are absent from the test registry.
    let result = resolve_exchanges(&["ZeroExV3".into()], &deployment);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::UnknownContract { .. }))
    ));
}

#[test]
fn request_resolves_tokens_fees_and_exchanges() {
    let deployment = registry();
    let config = config_with_exchanges(&["KyberNetwork", "OasisDex"]);

    let request = resolve_request(&config.fund, &deployment).unwrap();

    assert_eq!(
        request.denomination_asset(),
        deployment.token("WETH").unwrap()
    );
    assert_eq!(
        request.default_assets(),
        &[
            deployment.token("WETH").unwrap(),
            deployment.token("MLN").unwrap(),
        ]
    );
    assert_eq!(
        request.fee_rates()[0],
        U256::from(20_000_000_000_000_000u64)
    );
    assert_eq!(
        request.fee_rates()[1],
        U256::from(200_000_000_000_000_000u64)
    );
    assert_eq!(request.fee_periods()[1], U256::from(7_776_000u64));
    assert_eq!(request.exchanges().len(), 2);
    assert_eq!(request.adapters().len(), 2);
    assert_eq!(
        request.fees(),
        &[
            deployment.melon.get("ManagementFee").unwrap(),
            deployment.melon.get("PerformanceFee").unwrap(),
        ]
    );
}

#[test]
fn unknown_quote_token_is_fatal() {
    let deployment = registry();
    let mut config = config_with_exchanges(&[]);
    config.fund.quote_token = "USDC".into();

    let result = resolve_request(&config.fund, &deployment);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::UnknownToken { symbol })) if symbol == "USDC"
    ));
}

#[test]
fn unknown_allowed_token_is_fatal() {
    let deployment = registry();
    let mut config = config_with_exchanges(&[]);
    config.fund.allowed_tokens.push("USDC".into());

    let result = resolve_request(&config.fund, &deployment);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::UnknownToken { symbol })) if symbol == "USDC"
    ));
}

#[test]
fn fund_name_is_encoded_fixed_width() {
    let deployment = registry();
    let config = config_with_exchanges(&[]);

    let request = resolve_request(&config.fund, &deployment).unwrap();
    assert_eq!(&request.name()[..9], b"Test Fund");
    assert!(request.name()[9..].iter().all(|b| *b == 0));
}
