mod db_quat;
mod db_vec3;

pub use db_quat::DbQuat;
pub use db_vec3::DbVec3;
