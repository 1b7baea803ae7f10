use crate::error::{AppError, AppResult};

/// 生成上传文件的存储路径: `<upload_to>/<文件名>`
///
/// 只保留文件名本身 (去掉客户端带来的目录部分)，不写入任何文件内容。
pub fn upload_path(upload_to: &str, file_name: &str) -> AppResult<String> {
    let base_name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base_name.is_empty() || base_name == "." || base_name == ".." {
        return Err(AppError::ValidationError(format!(
            "Invalid upload file name: {file_name:?}"
        )));
    }

    let prefix = upload_to.trim_end_matches('/');
    if prefix.is_empty() {
        Ok(base_name.to_string())
    } else {
        Ok(format!("{prefix}/{base_name}"))
    }
}
