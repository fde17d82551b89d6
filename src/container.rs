use std::sync::Arc;

use crate::settings::Settings;
use crate::usecases::generate_avatar::GenerateAvatar;
use crate::usecases::get_avatar::GetAvatar;
use crate::usecases::save_avatar::SaveAvatar;
use crate::usecases::{self};
use crate::{gateways, settings};

pub struct Container {
    pub settings: Arc<Settings>,
    pub save_avatar: Arc<SaveAvatar>,
    pub generate_avatar: Arc<GenerateAvatar>,
    pub get_avatar: Arc<GetAvatar>,
}

pub async fn new() -> Container {
    let settings = Arc::new(settings::new());
    let s3 = Arc::new(gateways::s3::new(settings.clone()).await);
    let http = Arc::new(gateways::http::new(settings.clone()));
    let save_avatar = Arc::new(usecases::save_avatar::new(s3.clone()));
    let generate_avatar = Arc::new(usecases::generate_avatar::new(
        http.clone(),
        save_avatar.clone(),
    ));
    let get_avatar = Arc::new(usecases::get_avatar::new(s3.clone()));

    Container {
        settings,
        save_avatar,
        generate_avatar,
        get_avatar,
    }
}
