mod auth_dto;

pub use auth_dto::{
    AdminStatusDto, AuthResponseDto, AuthUserDto, LoginRequestDto, RegisterFormDto,
    RegisterRequestDto,
};
