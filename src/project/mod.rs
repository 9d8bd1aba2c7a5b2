/*!
 * 项目持久化模块
 */

pub mod io;

pub use io::{
    create_new_project, load_project, project_info, save_project, ProjectInfo, PROJECT_VERSION,
};
