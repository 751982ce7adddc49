pub mod pair;
pub mod token;

pub use pair::{Pair, PairOptions};
pub use token::{Currency, NativeCurrency, Token};
