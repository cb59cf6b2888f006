mod daily_limit;

pub use self::daily_limit::*;
