pub mod profile_handler;

pub use profile_handler::{
    __path_search_users, __path_update_email, __path_update_password, search_users,
    update_email, update_password, update_profile_form,
};
