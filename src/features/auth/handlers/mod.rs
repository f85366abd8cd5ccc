pub mod auth_handler;

pub use auth_handler::{
    __path_check_admin_status, __path_mobile_login, __path_mobile_register, check_admin_status,
    login_form, logout, mobile_login, mobile_register, register_form,
};
