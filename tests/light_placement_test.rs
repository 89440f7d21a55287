use approx::assert_relative_eq;
use cgmath::{InnerSpace, Vector3};
use lit_ngin::{
    lighting::{
        light::{DirectionalLight, LightArray, MAX_LIGHTS, PointLight, Spotlight},
        placement::{
            RingLayout, aim_direction, aim_directional_lights, place_point_lights,
            place_spotlights, ring_azimuth, ring_position,
        },
    },
    scene::Scene,
};

fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
    assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
}

#[test]
fn four_point_lights_sit_at_quarter_turns() {
    let mut lights = LightArray::<PointLight, MAX_LIGHTS>::new();
    lights.set_active_count(4).unwrap();
    let layout = RingLayout {
        radius: 5.0,
        height: 2.0,
    };

    assert_eq!(place_point_lights(&mut lights, layout), 4);

    let expected = [
        Vector3::new(5.0, 2.0, 0.0),
        Vector3::new(0.0, 2.0, 5.0),
        Vector3::new(-5.0, 2.0, 0.0),
        Vector3::new(0.0, 2.0, -5.0),
    ];
    for (light, expected) in lights.active().iter().zip(expected) {
        assert_vec_eq(light.pos, expected);
    }
}

#[test]
fn ring_is_evenly_spaced_for_every_count() {
    let layout = RingLayout {
        radius: 3.0,
        height: -1.0,
    };
    for count in 1..=MAX_LIGHTS {
        let step = std::f32::consts::TAU / count as f32;
        for i in 0..count {
            assert_relative_eq!(ring_azimuth(i, count).unwrap(), step * i as f32, epsilon = 1e-5);
            let pos = ring_position(i, count, layout).unwrap();
            assert_relative_eq!(pos.y, -1.0);
            assert_relative_eq!(Vector3::new(pos.x, 0.0, pos.z).magnitude(), 3.0, epsilon = 1e-5);
        }
        assert!(ring_azimuth(count, count).is_none());
    }
}

#[test]
fn zero_count_places_nothing() {
    assert!(ring_azimuth(0, 0).is_none());
    assert!(ring_position(0, 0, RingLayout::default()).is_none());
    assert!(aim_direction(0, 0, 30.0, 1.0).is_none());

    let mut points = LightArray::<PointLight, MAX_LIGHTS>::new();
    let before = *points.get(0).unwrap();
    assert_eq!(place_point_lights(&mut points, RingLayout::default()), 0);
    assert_eq!(*points.get(0).unwrap(), before);

    let mut directional = LightArray::<DirectionalLight, MAX_LIGHTS>::new();
    assert_eq!(aim_directional_lights(&mut directional, 180.0), 0);

    let mut spots = LightArray::<Spotlight, MAX_LIGHTS>::new();
    let before = *spots.get(0).unwrap();
    assert_eq!(place_spotlights(&mut spots, RingLayout::default(), 20.0), 0);
    assert_eq!(*spots.get(0).unwrap(), before);
    assert!(!before.pos.x.is_nan());
}

#[test]
fn aimed_directions_are_unit_length() {
    for count in 1..=MAX_LIGHTS {
        for i in 0..count {
            for tilt in [-60.0, 0.0, 45.0, 90.0, 180.0, 270.0] {
                for vertical in [1.0, -1.0] {
                    let dir = aim_direction(i, count, tilt, vertical).unwrap();
                    assert_relative_eq!(dir.magnitude(), 1.0, epsilon = 1e-5);
                }
            }
        }
    }
}

#[test]
fn zero_tilt_points_straight_along_the_vertical() {
    let mut spots = LightArray::<Spotlight, MAX_LIGHTS>::new();
    spots.set_active_count(3).unwrap();
    place_spotlights(&mut spots, RingLayout::default(), 0.0);
    for light in spots.active() {
        assert_vec_eq(light.dir, Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(light.pos.y, RingLayout::default().height);
    }

    let mut directional = LightArray::<DirectionalLight, MAX_LIGHTS>::new();
    directional.set_active_count(2).unwrap();
    aim_directional_lights(&mut directional, 180.0);
    for light in directional.active() {
        assert_vec_eq(light.dir, Vector3::new(0.0, 1.0, 0.0));
    }
}

#[test]
fn tilt_leans_the_first_light_along_its_azimuth() {
    // azimuth 0 is +x; sin(-(-90 deg)) = 1 so the horizontal part is +x
    let dir = aim_direction(0, 1, -90.0, -1.0).unwrap();
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert_vec_eq(dir, Vector3::new(half, -half, 0.0));
}

#[test]
fn only_live_lights_are_moved() {
    let mut lights = LightArray::<PointLight, MAX_LIGHTS>::new();
    lights.set_active_count(2).unwrap();
    let idle = *lights.get(5).unwrap();
    place_point_lights(&mut lights, RingLayout::default());
    assert_eq!(*lights.get(5).unwrap(), idle);
}

#[test]
fn manual_placement_keeps_edited_positions() {
    let mut scene = Scene::new();
    scene.point_lights.set_active_count(2).unwrap();
    scene.manual_placement = true;
    scene.point_lights.get_mut(0).unwrap().pos = Vector3::new(1.0, 2.0, 3.0);

    scene.update_lights();
    assert_eq!(scene.point_lights.get(0).unwrap().pos, Vector3::new(1.0, 2.0, 3.0));

    scene.manual_placement = false;
    scene.update_lights();
    assert_vec_eq(
        scene.point_lights.get(0).unwrap().pos,
        Vector3::new(scene.point_ring.radius, scene.point_ring.height, 0.0),
    );
}
