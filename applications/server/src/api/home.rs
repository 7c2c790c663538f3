/// Root route
use axum::response::Html;

/// GET / - Welcome page
pub async fn welcome() -> Html<&'static str> {
    Html("<h1>Welcome to the Roster API!</h1>")
}
