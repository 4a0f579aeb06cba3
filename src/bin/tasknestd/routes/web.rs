use rocket::response::content::RawHtml;
use rocket::{get, routes, Route};

// The dashboard frontend is served separately; this is only here so that
// hitting the root does not 404.
#[get("/")]
fn landing() -> RawHtml<&'static str> {
    RawHtml(
        "<html><head><title>tasknest</title></head>\
         <body>tasknest API lives under /api</body></html>"
    )
}

pub fn web_routes() -> Vec<Route> {
    routes![landing]
}
