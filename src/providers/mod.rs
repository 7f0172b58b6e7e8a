// Providers layer - Work performers and business logic
//
// Providers hold the reusable pieces coordinators compose: password hashing,
// session tokens, credential checks and PDF rendering.

pub mod authentication_provider;
pub mod crypto_provider;
pub mod report_pdf_provider;
pub mod token_provider;

pub use authentication_provider::AuthenticationProvider;
pub use crypto_provider::CryptoProvider;
pub use report_pdf_provider::ReportPdfProvider;
pub use token_provider::TokenProvider;
