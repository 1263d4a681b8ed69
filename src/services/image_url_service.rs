use aws_sdk_s3 as s3;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

use crate::config::Environment;

pub fn storage_prefix(kind: &str, environment: Environment) -> String {
    match environment {
        Environment::Staging => format!("{}-staging", kind),
        Environment::Main => format!("{}-main", kind),
    }
}

pub fn object_key(
    kind: &str,
    environment: Environment,
    owner_id: i32,
    image_uuid: uuid::Uuid,
    extension: &str,
) -> String {
    format!(
        "{}/{}/{}.{}",
        storage_prefix(kind, environment),
        owner_id,
        image_uuid,
        extension
    )
}

pub fn public_url(assets_url: &str, key: &str) -> String {
    format!("{}/{}", assets_url, key)
}

pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

pub async fn put_object_url(
    client: &s3::Client,
    bucket: &str,
    object: &str,
    content_type: &str,
    expires_in: u64,
) -> Result<String, s3::Error> {
    let expires_in: std::time::Duration = Duration::from_secs(expires_in);
    let expires_in: s3::presigning::PresigningConfig =
        PresigningConfig::expires_in(expires_in).unwrap();

    let presigned_request = client
        .put_object()
        .bucket(bucket)
        .key(object)
        .content_type(content_type)
        .presigned(expires_in)
        .await?;

    Ok(presigned_request.uri().into())
}

pub async fn delete_single_object(
    client: &s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), s3::Error> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await?;

    Ok(())
}

pub async fn delete_objects_by_prefix(
    client: &s3::Client,
    bucket: &str,
    prefix: &str,
) -> Result<usize, s3::Error> {
    let mut objects_to_delete = Vec::new();

    let mut continuation_token: Option<String> = None;

    loop {
        let mut list_request = client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = continuation_token {
            list_request = list_request.continuation_token(token);
        }

        let response = list_request.send().await?;

        if let Some(contents) = response.contents {
            for object in contents {
                if let Some(key) = object.key {
                    objects_to_delete.push(key);
                }
            }
        }

        if !response.is_truncated.unwrap_or(false) {
            break;
        }

        continuation_token = response.next_continuation_token;
    }

    if objects_to_delete.is_empty() {
        return Ok(0);
    }

    let delete_count = objects_to_delete.len();

    for key in objects_to_delete {
        client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
    }

    Ok(delete_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_scoped_by_environment() {
        let uuid = uuid::Uuid::nil();

        let staging = object_key("products", Environment::Staging, 7, uuid, "png");
        let main = object_key("products", Environment::Main, 7, uuid, "png");

        assert!(staging.starts_with("products-staging/7/"));
        assert!(main.starts_with("products-main/7/"));
        assert!(staging.ends_with(".png"));
    }

    #[test]
    fn unknown_content_types_fall_back_to_jpg() {
        assert_eq!(extension_for("image/webp"), "webp");
        assert_eq!(extension_for("application/octet-stream"), "jpg");
    }
}
