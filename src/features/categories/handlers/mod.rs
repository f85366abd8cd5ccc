pub mod category_handler;

pub use category_handler::{
    __path_add_category, __path_bulk_delete_categories, __path_list_categories,
    __path_list_mobile_event_categories, add_category, bulk_delete_categories, list_categories,
    list_mobile_event_categories,
};
