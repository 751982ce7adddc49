pub mod amount;
pub mod fraction;
pub mod percentage;
pub mod price;

pub use amount::CurrencyAmount;
pub use fraction::Fraction;
pub use percentage::Percent;
pub use price::Price;
