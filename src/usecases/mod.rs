pub mod gateways;
pub mod generate_avatar;
pub mod get_avatar;
pub mod save_avatar;

#[cfg(test)]
pub mod testing;
