use crate::gateways::{
    cache::{KeyValueCache, SaveOptions},
    clock::Clock,
};
use time::Duration;

/// Cache key of the timestamp (Unix seconds) at which the
/// provider last reported that the daily quota was exceeded.
pub const DAILY_LIMIT_CACHE_KEY: &str = "GeocodingService_dailyLimit";

/// Requests are suspended for this period after the quota was exceeded.
pub const DAILY_LIMIT_BLACKOUT: Duration = Duration::hours(24);

pub fn is_over_daily_limit<K, C>(cache: &K, clock: &C) -> bool
where
    K: KeyValueCache + ?Sized,
    C: Clock + ?Sized,
{
    let Some(value) = cache.load(DAILY_LIMIT_CACHE_KEY) else {
        return false;
    };
    let marked_at = match value.trim().parse::<i64>() {
        Ok(ts) => ts,
        Err(err) => {
            log::warn!("Ignoring invalid daily limit flag '{value}': {err}");
            return false;
        }
    };
    let elapsed = clock.now().unix_timestamp() - marked_at;
    elapsed <= DAILY_LIMIT_BLACKOUT.whole_seconds()
}

pub fn mark_daily_limit<K, C>(cache: &K, clock: &C)
where
    K: KeyValueCache + ?Sized,
    C: Clock + ?Sized,
{
    let now = clock.now().unix_timestamp();
    log::warn!("Daily geocoding limit exceeded: suspending requests");
    cache.save(&now.to_string(), DAILY_LIMIT_CACHE_KEY, &SaveOptions::default());
}
