pub mod precaution_handler;

pub use precaution_handler::{
    __path_delete_precautions, __path_list_precautions, __path_submit_precaution,
    delete_precautions, list_precautions, submit_precaution,
};
