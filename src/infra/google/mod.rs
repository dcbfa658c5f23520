//! Google OAuth installed-app flow, token cache and Sheets API client.

mod callback;
mod credentials;
pub(crate) mod error;
#[cfg(test)]
pub mod mock;
mod oauth;
mod sheets;
mod token;

pub use credentials::ClientSecret;
pub use oauth::{OAuthClient, acquire_token};
#[cfg(test)]
pub use oauth::SHEETS_SCOPE;
pub use sheets::{SheetsClient, spreadsheet_url};
pub use token::TokenCache;
#[cfg(test)]
pub use token::TokenRecord;
