//! Table rendering for the CLI.

use anyhow::Result;
use balanced_amm_routing::prelude::{AmmResult, Pair, Percent, PoolType, Price, Trade, TradeType};
use prettytable::{Table, row};

const PRICE_DIGITS: u32 = 6;

fn pool_type_label(pool_type: PoolType) -> &'static str {
    match pool_type {
        PoolType::ConstantProduct => "constant product",
        PoolType::StabilityFund => "stability fund",
        PoolType::Queue => "queue",
    }
}

/// One row per pair with reserves and both mid prices.
pub fn pairs_table(pairs: &[Pair]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Pool", "Pair", "Type", "Reserve 0", "Reserve 1", "Price 0", "Price 1"]);
    for pair in pairs {
        let pool = pair.pool_id().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        // empty pools and stability funds have no reserve ratio
        let price = |p: AmmResult<Price>| {
            p.map(|p| p.to_string()).unwrap_or_else(|_| "-".to_string())
        };
        let (price0, price1) = if pair.is_stability_fund() {
            ("1:1".to_string(), "1:1".to_string())
        } else {
            (price(pair.token0_price()), price(pair.token1_price()))
        };
        table.add_row(row![
            pool,
            pair,
            pool_type_label(pair.pool_type()),
            pair.reserve0(),
            pair.reserve1(),
            price0,
            price1
        ]);
    }
    table
}

/// Ranked trades with execution price, price impact and the slippage bound
/// relevant to the trade direction.
pub fn trades_table(trades: &[Trade], slippage: &Percent) -> Result<Table> {
    let mut table = Table::new();
    let bound_title = match trades.first().map(Trade::trade_type) {
        Some(TradeType::ExactOutput) => "Maximum in",
        _ => "Minimum out",
    };
    table.set_titles(row![
        "#",
        "Route",
        "Input",
        "Output",
        "Execution price",
        "Price impact",
        bound_title
    ]);
    for (rank, trade) in trades.iter().enumerate() {
        let bound = match trade.trade_type() {
            TradeType::ExactInput => trade.minimum_amount_out(slippage)?,
            TradeType::ExactOutput => trade.maximum_amount_in(slippage)?,
        };
        let rank = rank + 1;
        table.add_row(row![
            rank,
            trade.route(),
            trade.input_amount(),
            trade.output_amount(),
            trade.execution_price()?.to_significant(PRICE_DIGITS),
            format!("{}%", trade.price_impact()?.to_fixed(2)),
            bound
        ]);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use balanced_amm_routing::prelude::{
        BestTradeOptions, ChainConfig, CurrencyAmount, PairOptions, Token, best_trade_exact_in,
        best_trade_exact_out,
    };

    fn token(address: &str) -> Token {
        Token::new(1, address, 18, address.to_uppercase(), address)
    }

    fn pairs() -> Vec<Pair> {
        let chain = ChainConfig::new(1, "cxnative");
        let pair = |a: &str, b: &str, ra: u64, rb: u64| {
            Pair::new(
                CurrencyAmount::from_raw_amount(token(a), ra),
                CurrencyAmount::from_raw_amount(token(b), rb),
                &chain,
                PairOptions::default(),
            )
            .unwrap()
        };
        vec![pair("a", "b", 1000, 1000), pair("b", "c", 1200, 1000), pair("a", "c", 1000, 1100)]
    }

    #[test]
    fn test_pairs_table_has_a_row_per_pair() {
        let table = pairs_table(&pairs());
        assert_eq!(table.len(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("constant product"));
        assert!(rendered.contains("A/B"));
    }

    #[test]
    fn test_trades_table_ranks_trades() {
        let pairs = pairs();
        let amount = CurrencyAmount::from_raw_amount(token("a"), 100u64);
        let trades = best_trade_exact_in(&pairs, &amount, &token("c").into(), BestTradeOptions::default()).unwrap();
        let table = trades_table(&trades, &Percent::from_bps(50)).unwrap();
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Minimum out"));
        assert!(rendered.contains("A -> C"));
    }

    #[test]
    fn test_exact_output_shows_maximum_in() {
        let pairs = pairs();
        let amount = CurrencyAmount::from_raw_amount(token("c"), 50u64);
        let trades = best_trade_exact_out(&pairs, &token("a").into(), &amount, BestTradeOptions::default()).unwrap();
        let table = trades_table(&trades, &Percent::from_bps(100)).unwrap();
        assert!(table.to_string().contains("Maximum in"));
    }
}
