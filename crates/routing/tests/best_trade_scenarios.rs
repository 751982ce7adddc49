use balanced_amm_routing::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

const NATIVE: &str = "cx0000000000000000000000000000000000000000";

fn chain() -> ChainConfig {
    ChainConfig::new(1, NATIVE)
}

fn token(address: &str, decimals: u8) -> Token {
    Token::new(1, address, decimals, address.to_uppercase(), address)
}

fn amount(token: &Token, raw: u64) -> CurrencyAmount {
    CurrencyAmount::from_raw_amount(token.clone(), raw)
}

fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
    Pair::new(amount(a, ra), amount(b, rb), &chain(), PairOptions::default()).unwrap()
}

struct Universe {
    t0: Token,
    t1: Token,
    t2: Token,
    pairs: Vec<Pair>,
}

fn universe() -> Universe {
    let (t0, t1, t2) = (token("cxt0", 18), token("cxt1", 18), token("cxt2", 18));
    let pairs = vec![
        pair(&t0, 1_000, &t1, 1_000),
        pair(&t0, 1_000, &t2, 1_100),
        pair(&t1, 1_200, &t2, 1_000),
    ];
    Universe { t0, t1, t2, pairs }
}

#[test]
fn exact_in_finds_direct_and_two_hop_routes() {
    let u = universe();
    let trades = best_trade_exact_in(
        &u.pairs,
        &amount(&u.t0, 100),
        &u.t2.clone().into(),
        BestTradeOptions::default(),
    )
    .unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].route().path(), &[u.t0.clone(), u.t2.clone()]);
    assert_eq!(trades[0].output_amount(), &amount(&u.t2, 99));
    assert_eq!(trades[1].route().path(), &[u.t0.clone(), u.t1.clone(), u.t2.clone()]);
    assert_eq!(trades[1].output_amount(), &amount(&u.t2, 69));
}

#[test]
fn exact_in_respects_max_hops() {
    let u = universe();
    let trades = best_trade_exact_in(
        &u.pairs,
        &amount(&u.t0, 100),
        &u.t2.clone().into(),
        BestTradeOptions::default().with_max_hops(1),
    )
    .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].route().hops(), 1);
}

#[test]
fn exact_out_ranks_by_least_input() {
    let u = universe();
    let trades = best_trade_exact_out(
        &u.pairs,
        &u.t0.clone().into(),
        &amount(&u.t2, 69),
        BestTradeOptions::default(),
    )
    .unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].route().hops(), 1);
    assert!(trades[0].input_amount().as_fraction() <= trades[1].input_amount().as_fraction());
    for trade in &trades {
        assert_eq!(trade.output_amount(), &amount(&u.t2, 69));
        assert_eq!(trade.route().path().first(), Some(&u.t0));
        assert_eq!(trade.route().path().last(), Some(&u.t2));
    }
}

#[test]
fn empty_pair_list_returns_no_trades() {
    let u = universe();
    let trades = best_trade_exact_in(
        &[],
        &amount(&u.t0, 100),
        &u.t2.clone().into(),
        BestTradeOptions::default(),
    )
    .unwrap();
    assert!(trades.is_empty());

    let trades = best_trade_exact_out(
        &[],
        &u.t0.clone().into(),
        &amount(&u.t2, 100),
        BestTradeOptions::default(),
    )
    .unwrap();
    assert!(trades.is_empty());
}

#[test]
fn zero_max_hops_is_rejected() {
    let u = universe();
    let err = best_trade_exact_out(
        &u.pairs,
        &u.t0.clone().into(),
        &amount(&u.t2, 10),
        BestTradeOptions::default().with_max_hops(0),
    )
    .unwrap_err();
    assert_eq!(err, AmmError::MaxHops(0));
}

#[test]
fn stability_fund_rescales_without_moving_reserves() {
    let (usd, usdc) = (token("cxbnusd", 18), token("cxusdc", 6));
    let fund = Pair::new(
        amount(&usd, 0),
        amount(&usdc, 0),
        &chain(),
        PairOptions::default().stability_fund(),
    )
    .unwrap();

    let (out, after) = fund.get_output_amount(&amount(&usd, 100)).unwrap();
    assert_eq!(out.as_fraction(), &Fraction::new(100, 1_000_000_000_000u64).unwrap());
    assert_eq!(after.reserve0(), fund.reserve0());
    assert_eq!(after.reserve1(), fund.reserve1());

    let trades = best_trade_exact_in(
        &[fund],
        &amount(&usd, 1_000_000_000_000_000_000),
        &usdc.clone().into(),
        BestTradeOptions::default(),
    )
    .unwrap();
    assert_eq!(trades[0].output_amount(), &amount(&usdc, 1_000_000));
}

#[test]
fn native_currency_routes_through_queue_pool() {
    let wrapped = token(NATIVE, 18);
    let icx = NativeCurrency::new(1, 18, "ICX", "ICX", wrapped.clone());
    let (sicx, usd) = (token("cxsicx", 18), token("cxbnusd", 18));
    let pairs = vec![
        pair(&wrapped, 1_000_000, &sicx, 1_000_000),
        pair(&sicx, 1_000_000, &usd, 2_000_000),
    ];
    let trades = best_trade_exact_in(
        &pairs,
        &CurrencyAmount::from_raw_amount(icx.clone(), 1_000u64),
        &usd.clone().into(),
        BestTradeOptions::default(),
    )
    .unwrap();

    assert_eq!(trades.len(), 1);
    let trade = &trades[0];
    assert_eq!(trade.input_amount().currency(), &Currency::Native(icx));
    assert_eq!(trade.route().path(), &[wrapped, sicx, usd]);
    assert_eq!(trade.pairs_after().len(), 2);
}

fn random_universe() -> impl Strategy<Value = Vec<(usize, usize, u64, u64)>> {
    prop::collection::vec((0usize..5, 0usize..5, 1_000u64..1_000_000, 1_000u64..1_000_000), 1..8)
}

proptest! {
    #[test]
    fn routes_never_reuse_pairs_and_span_endpoints(
        specs in random_universe(),
        amount_in in 1u64..100_000,
    ) {
        let tokens: Vec<Token> = (0..5).map(|i| token(&format!("cxt{i}"), 18)).collect();
        let pairs: Vec<Pair> = specs
            .iter()
            .filter(|(a, b, _, _)| a != b)
            .map(|&(a, b, ra, rb)| pair(&tokens[a], ra, &tokens[b], rb))
            .collect();

        let trades = best_trade_exact_in(
            &pairs,
            &amount(&tokens[0], amount_in),
            &tokens[4].clone().into(),
            BestTradeOptions::default().with_max_num_results(10),
        )
        .unwrap();

        for window in trades.windows(2) {
            prop_assert!(window[0].output_amount().as_fraction() >= window[1].output_amount().as_fraction());
        }
        for trade in &trades {
            let route = trade.route();
            prop_assert_eq!(route.path().len(), route.pairs().len() + 1);
            prop_assert_eq!(route.path().first(), Some(&tokens[0]));
            prop_assert_eq!(route.path().last(), Some(&tokens[4]));
            prop_assert!(route.hops() <= 3);

            let mut seen = HashSet::new();
            for p in route.pairs() {
                let key = (p.token0().address.clone(), p.token1().address.clone(), p.reserve0().quotient(), p.reserve1().quotient());
                prop_assert!(seen.insert(key));
            }
        }
    }

    #[test]
    fn minimum_amount_out_decreases_with_slippage(
        amount_in in 1_000u64..100_000,
        low in 0u32..5_000,
        extra in 1u32..5_000,
    ) {
        let u = universe();
        let trades = best_trade_exact_in(
            &u.pairs,
            &amount(&u.t0, amount_in),
            &u.t2.clone().into(),
            BestTradeOptions::default(),
        )
        .unwrap();
        let trade = &trades[0];
        prop_assert_eq!(&trade.minimum_amount_out(&Percent::zero()).unwrap(), trade.output_amount());
        let tighter = trade.minimum_amount_out(&Percent::from_bps(low)).unwrap();
        let looser = trade.minimum_amount_out(&Percent::from_bps(low + extra)).unwrap();
        prop_assert!(looser.as_fraction() < tighter.as_fraction());
    }
}
