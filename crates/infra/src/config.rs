use sevent_reminders_domain::{Locale, NotificationSettings, Tz};
use std::{convert::TryFrom, fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret the external scheduler has to present when triggering a
    /// dispatch cycle. When this is `None` every trigger is rejected.
    pub cron_secret: Option<String>,
    /// Port for the application to run on
    pub port: usize,
    /// How old (in millis) a reminder may be and still get sent. Reminders
    /// older than this are never picked up again and are reported as missed.
    pub reminder_window_millis: i64,
    /// Maximum number of reminders processed at the same time within one cycle
    pub dispatch_concurrency: usize,
    /// When set, the application also triggers a dispatch cycle itself
    /// at this interval
    pub internal_trigger_interval_secs: Option<u64>,
    pub email: EmailConfig,
    pub notification: NotificationSettings,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Sender identity of the reminder emails
    pub from: String,
    /// Without an api key every delivery fails
    pub api_key: Option<String>,
    pub api_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: "no-reply@resend.dev".into(),
            api_key: None,
            api_url: "https://api.resend.com".into(),
        }
    }
}

impl Config {
    /// Reads the configuration from the environment. Invalid values are
    /// logged and replaced by their defaults.
    pub fn new() -> Self {
        let defaults = Self::default();

        let cron_secret = non_empty_env("CRON_SECRET");
        if cron_secret.is_none() {
            warn!("Did not find CRON_SECRET environment variable. Every reminder trigger will be rejected.");
        }

        let window_secs = parse_env("REMINDER_WINDOW_SECS", defaults.reminder_window_millis / 1000);
        let reminder_window_millis = window_secs_to_millis(window_secs).unwrap_or_else(|| {
            warn!(
                "The given REMINDER_WINDOW_SECS: {} must be positive and at most {}, falling back to: {}.",
                window_secs,
                i64::MAX / 1000,
                defaults.reminder_window_millis / 1000
            );
            defaults.reminder_window_millis
        });

        let dispatch_concurrency = parse_env(
            "REMINDER_DISPATCH_CONCURRENCY",
            defaults.dispatch_concurrency,
        )
        .max(1);

        let internal_trigger_interval_secs = non_empty_env("REMINDER_INTERNAL_INTERVAL_SECS")
            .and_then(|interval| match interval.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    warn!(
                        "The given REMINDER_INTERNAL_INTERVAL_SECS: {} is not valid, the internal trigger is disabled.",
                        interval
                    );
                    None
                }
            });
        if let Some(secs) = internal_trigger_interval_secs {
            info!("Internal reminder trigger enabled, running every {} seconds", secs);
        }

        let email = EmailConfig {
            from: non_empty_env("EMAIL_FROM").unwrap_or(defaults.email.from),
            api_key: non_empty_env("RESEND_API_KEY"),
            api_url: non_empty_env("RESEND_API_URL").unwrap_or(defaults.email.api_url),
        };
        if email.api_key.is_none() {
            warn!("Did not find RESEND_API_KEY environment variable. Reminder emails will not be delivered.");
        }

        let notification = NotificationSettings {
            app_name: non_empty_env("APP_NAME").unwrap_or(defaults.notification.app_name),
            link_base: non_empty_env("FRONTEND_URL").unwrap_or(defaults.notification.link_base),
            locale: parse_locale_env(defaults.notification.locale),
            timezone: parse_timezone_env(defaults.notification.timezone),
            placeholder: non_empty_env("REMINDER_PLACEHOLDER")
                .unwrap_or(defaults.notification.placeholder),
        };

        Self {
            cron_secret,
            port: parse_env("PORT", defaults.port),
            reminder_window_millis,
            dispatch_concurrency,
            internal_trigger_interval_secs,
            email,
            notification,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cron_secret: None,
            port: 5000,
            reminder_window_millis: 1000 * 120, // 2 minutes
            dispatch_concurrency: 4,
            internal_trigger_interval_secs: None,
            email: Default::default(),
            notification: Default::default(),
        }
    }
}

/// `None` when the window is not positive or does not fit in millis
fn window_secs_to_millis(secs: i64) -> Option<i64> {
    if secs <= 0 {
        return None;
    }
    secs.checked_mul(1000)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match non_empty_env(name) {
        None => default,
        Some(val) => match val.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, val, default
                );
                default
            }
        },
    }
}

fn parse_locale_env(default: Locale) -> Locale {
    let locale = match non_empty_env("REMINDER_LOCALE") {
        Some(locale) => locale,
        None => return default,
    };
    // Accept both `vi-VN` and `vi_VN`
    match Locale::try_from(locale.replace('-', "_").as_str()) {
        Ok(locale) => locale,
        Err(_) => {
            warn!(
                "The given REMINDER_LOCALE: {} is not valid, falling back to the default: {:?}.",
                locale, default
            );
            default
        }
    }
}

fn parse_timezone_env(default: Tz) -> Tz {
    match non_empty_env("REMINDER_TIMEZONE") {
        None => default,
        Some(timezone) => timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "The given REMINDER_TIMEZONE: {} is not valid, falling back to the default: {:?}.",
                timezone, default
            );
            default
        }),
    }
}
