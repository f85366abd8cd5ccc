mod profile_dto;

pub use profile_dto::{
    EmailUpdatedDto, UpdateEmailDto, UpdatePasswordDto, UpdateProfileFormDto, UserSearchQuery,
    UserSummaryDto,
};
