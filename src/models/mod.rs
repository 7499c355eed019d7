pub mod log;
pub mod refresh_token;
pub mod request;
pub mod user;

pub use log::Entity as Log;
pub use refresh_token::Entity as RefreshToken;
pub use request::{Entity as Request, Model as RequestModel};
pub use user::{Entity as User, Model as UserModel};
