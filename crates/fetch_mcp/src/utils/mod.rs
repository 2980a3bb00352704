mod html_utils;
pub use html_utils::{ContentKind, transform};

mod http_client;
pub use http_client::build_client;

mod robots_utils;
pub use robots_utils::{RobotsTxt, get_robots_txt_url};
