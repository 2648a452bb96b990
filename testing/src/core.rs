use async_trait::async_trait;
use mockall::mock;
use medcore::{
    ac::{
        traits::{
            PermissionBackend,
            UserBackend,
        },
        user::User,
        PermissionMatrix,
        Role,
    },
    error::BackendError,
    platform::PlatformUrl,
};

mock! {
    pub Platform {}

    impl PlatformUrl for Platform {
        fn url(&self) -> &str;
    }

    #[async_trait]
    impl UserBackend for Platform {
        async fn add_user(
            &self,
            name: &str,
            role: Role,
        ) -> Result<i64, BackendError>;
        async fn get_user_by_id(
            &self,
            id: i64,
        ) -> Result<Option<User>, BackendError>;
        async fn get_user_by_name(
            &self,
            name: &str,
        ) -> Result<Option<User>, BackendError>;
    }

    #[async_trait]
    impl PermissionBackend for Platform {
        async fn provision_user(
            &self,
            name: &str,
            role: Role,
            matrix: &PermissionMatrix,
        ) -> Result<i64, BackendError>;
        async fn get_permissions(
            &self,
            user_id: i64,
        ) -> Result<Option<PermissionMatrix>, BackendError>;
        async fn set_permissions(
            &self,
            user_id: i64,
            matrix: &PermissionMatrix,
        ) -> Result<(), BackendError>;
    }
}
