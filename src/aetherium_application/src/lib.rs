pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use use_cases::{
    current_user::{CurrentUserError, CurrentUserUseCase},
    login::{LoginError, LoginResponse, LoginUseCase},
    refresh::{RefreshError, RefreshResponse, RefreshUseCase},
    register::{RegisterError, RegisterUseCase},
};
