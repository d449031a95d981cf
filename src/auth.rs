use log::info;

use crate::error::ScoutError;
use crate::page::{PageDriver, PageElement};

pub const LOGIN_URL: &str = "https://www.chess.com/login_and_go?";
const USERNAME_FIELD: &str = r#"//*[@id="username"]"#;
const PASSWORD_FIELD: &str = r#"//*[@id="password"]"#;
const LOGIN_BUTTON: &str = r#"//*[@id="login"]"#;

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Logs in on the hosting site and returns to the page we came from.
/// Success is judged by the URL having left the login page; staying put
/// means the credentials were rejected.
pub fn authorize<D: PageDriver>(driver: &D, credentials: &Credentials) -> Result<(), ScoutError> {
    let prev_url = driver.current_url()?;
    driver.goto(LOGIN_URL)?;
    driver
        .find_element(USERNAME_FIELD)?
        .send_keys(&credentials.username)?;
    driver
        .find_element(PASSWORD_FIELD)?
        .send_keys(&credentials.password)?;
    driver.find_element(LOGIN_BUTTON)?.click()?;
    if driver.current_url()? == LOGIN_URL {
        return Err(ScoutError::Authorization(LOGIN_URL.to_string()));
    }
    info!("authorization succeeded, returning to {}", prev_url);
    driver.goto(&prev_url)?;
    Ok(())
}
