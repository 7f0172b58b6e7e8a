use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::context::RequestContext;

/// Create an administrator account from the command line
///
/// When no password is supplied a random one is generated and printed once.
pub async fn create_user(
    app_data: Arc<AppData>,
    username: &str,
    password: Option<String>,
) -> Result<user::Model, InternalError> {
    let ctx = RequestContext::for_cli("create-user");
    let generated = password.is_none();

    let coordinator = AuthCoordinator::new(app_data);
    let (user, password) = coordinator.create_user(&ctx, username, password).await?;

    println!("✓ User created: {} ({})", user.username, user.id);
    if generated {
        println!("  Generated password: {}", password);
        println!("  Store it now; it will not be shown again.");
    }

    Ok(user)
}
